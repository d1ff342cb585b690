// src/services/car_service.rs
use async_trait::async_trait;
use std::sync::Arc;
use tracing;

use crate::{
    errors::TaxiError as AppError,
    forms::{CarForm, CarSearchForm},
    models::{
        car::{Car, CarDetailResponse, CarResponse},
        driver::DriverResponse,
        manufacturer::ManufacturerResponse,
    },
    services::store::{FleetStore, Tables},
    utils::id_generator::{IdGenerator, IdType},
};

#[async_trait]
pub trait CarOperations: Send + Sync {
    async fn create_car(&self, form: CarForm) -> Result<CarDetailResponse, AppError>;
    async fn get_car(&self, car_id: &str) -> Result<Option<CarDetailResponse>, AppError>;
    async fn list_cars(&self, search: CarSearchForm) -> Result<Vec<CarResponse>, AppError>;
    async fn update_car(&self, car_id: &str, form: CarForm) -> Result<CarDetailResponse, AppError>;
    async fn delete_car(&self, car_id: &str) -> Result<(), AppError>;
    async fn assign_driver(&self, car_id: &str, driver_id: &str) -> Result<CarDetailResponse, AppError>;
    async fn unassign_driver(&self, car_id: &str, driver_id: &str) -> Result<CarDetailResponse, AppError>;
}

pub struct CarService {
    store: Arc<FleetStore>,
}

impl CarService {
    pub fn new(store: Arc<FleetStore>) -> Self {
        Self { store }
    }
}

/// Builds the list view of a car. The manufacturer FK is guaranteed by the store.
pub(crate) fn car_response(tables: &Tables, car: &Car) -> Result<CarResponse, AppError> {
    let manufacturer = tables
        .manufacturer(&car.manufacturer_id)
        .ok_or_else(|| AppError::internal_error(format!("Car {} has no manufacturer", car.id)))?;
    Ok(CarResponse {
        id: car.id.clone(),
        model: car.model.clone(),
        manufacturer: ManufacturerResponse::from(manufacturer.clone()),
        display: car.to_string(),
    })
}

fn car_detail(tables: &Tables, car: &Car) -> Result<CarDetailResponse, AppError> {
    let CarResponse { id, model, manufacturer, display } = car_response(tables, car)?;
    Ok(CarDetailResponse {
        id,
        model,
        manufacturer,
        drivers: tables.drivers_of_car(&car.id).into_iter().map(DriverResponse::from).collect(),
        display,
    })
}

fn detail_by_id(tables: &Tables, car_id: &str) -> Result<CarDetailResponse, AppError> {
    let car = tables.car(car_id).ok_or_else(|| AppError::car_not_found(car_id))?;
    car_detail(tables, car)
}

#[async_trait]
impl CarOperations for CarService {
    async fn create_car(&self, form: CarForm) -> Result<CarDetailResponse, AppError> {
        let mut tables = self.store.write().await;
        let cleaned = form.clean(&*tables)?;
        let car = tables.insert_car(Car::new(cleaned.model, cleaned.manufacturer_id), &cleaned.driver_ids)?;

        tracing::info!("Car created: {} ({}) with {} drivers", car.id, car, cleaned.driver_ids.len());
        car_detail(&tables, &car)
    }

    async fn get_car(&self, car_id: &str) -> Result<Option<CarDetailResponse>, AppError> {
        if !IdGenerator::validate_id(car_id, Some(IdType::Car)) {
            tracing::warn!("Invalid car ID format: {}", car_id);
            return Ok(None);
        }

        tracing::debug!("Getting car: {}", car_id);
        let tables = self.store.read().await;
        tables.car(car_id).map(|car| car_detail(&tables, car)).transpose()
    }

    async fn list_cars(&self, search: CarSearchForm) -> Result<Vec<CarResponse>, AppError> {
        tracing::debug!("Listing cars, model filter: {:?}", search.model);
        let tables = self.store.read().await;
        tables
            .cars()
            .into_iter()
            .filter(|car| search.matches(&car.model))
            .map(|car| car_response(&tables, car))
            .collect()
    }

    async fn update_car(&self, car_id: &str, form: CarForm) -> Result<CarDetailResponse, AppError> {
        let mut tables = self.store.write().await;
        if tables.car(car_id).is_none() {
            return Err(AppError::car_not_found(car_id));
        }
        let cleaned = form.clean(&*tables)?;
        let car = tables.update_car(car_id, cleaned.model, cleaned.manufacturer_id, &cleaned.driver_ids)?;

        tracing::info!("Car updated: {}", car.id);
        car_detail(&tables, &car)
    }

    async fn delete_car(&self, car_id: &str) -> Result<(), AppError> {
        let car = self.store.write().await.delete_car(car_id)?;
        tracing::info!("Car deleted: {} ({})", car.id, car);
        Ok(())
    }

    async fn assign_driver(&self, car_id: &str, driver_id: &str) -> Result<CarDetailResponse, AppError> {
        let mut tables = self.store.write().await;
        if tables.assign_driver(car_id, driver_id)? {
            tracing::info!("Driver {} assigned to car {}", driver_id, car_id);
        } else {
            tracing::debug!("Driver {} already assigned to car {}", driver_id, car_id);
        }
        detail_by_id(&tables, car_id)
    }

    async fn unassign_driver(&self, car_id: &str, driver_id: &str) -> Result<CarDetailResponse, AppError> {
        let mut tables = self.store.write().await;
        if tables.unassign_driver(car_id, driver_id)? {
            tracing::info!("Driver {} removed from car {}", driver_id, car_id);
        }
        detail_by_id(&tables, car_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, Manufacturer};
    use chrono::Utc;

    struct Fixture {
        service: CarService,
        manufacturer_id: String,
        driver_ids: Vec<String>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(FleetStore::new());
        let (manufacturer_id, driver_ids) = {
            let mut tables = store.write().await;
            let toyota = tables.insert_manufacturer(Manufacturer::new("Toyota", "Japan"));
            let mut driver_ids = Vec::new();
            for (username, license) in [("driver1", "ABC12345"), ("driver2", "XYZ67890")] {
                let driver = tables
                    .insert_driver(Driver {
                        id: String::new(),
                        username: username.into(),
                        first_name: "John".into(),
                        last_name: "Doe".into(),
                        password_hash: "salt$hash".into(),
                        license_number: license.into(),
                        is_active: true,
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    })
                    .unwrap();
                driver_ids.push(driver.id);
            }
            (toyota.id, driver_ids)
        };
        Fixture {
            service: CarService::new(store),
            manufacturer_id,
            driver_ids,
        }
    }

    fn form(model: &str, manufacturer: &str, drivers: &[String]) -> CarForm {
        CarForm {
            model: Some(model.into()),
            manufacturer: Some(manufacturer.into()),
            drivers: drivers.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_create_car_with_drivers() {
        let f = fixture().await;
        let car = f
            .service
            .create_car(form("Corolla", &f.manufacturer_id, &f.driver_ids))
            .await
            .unwrap();
        assert_eq!(car.display, "Corolla");
        assert_eq!(car.manufacturer.name, "Toyota");
        assert_eq!(car.drivers.len(), 2);
    }

    #[tokio::test]
    async fn test_create_car_empty_form_writes_nothing() {
        let f = fixture().await;
        let err = f.service.create_car(CarForm::default()).await.unwrap_err();
        assert!(err.has_field_error("model"));
        assert!(f.service.list_cars(CarSearchForm::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assignment_counts() {
        let f = fixture().await;
        let car = f.service.create_car(form("Corolla", &f.manufacturer_id, &[])).await.unwrap();

        f.service.assign_driver(&car.id, &f.driver_ids[0]).await.unwrap();
        let detail = f.service.assign_driver(&car.id, &f.driver_ids[1]).await.unwrap();
        assert_eq!(detail.drivers.len(), 2);

        let detail = f.service.assign_driver(&car.id, &f.driver_ids[1]).await.unwrap();
        assert_eq!(detail.drivers.len(), 2);

        let detail = f.service.unassign_driver(&car.id, &f.driver_ids[0]).await.unwrap();
        assert_eq!(detail.drivers.len(), 1);
        assert_eq!(detail.drivers[0].username, "driver2");
    }

    #[tokio::test]
    async fn test_get_car_with_malformed_id() {
        let f = fixture().await;
        assert!(f.service.get_car("not-an-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_update_delete() {
        let f = fixture().await;
        let car = f.service.create_car(form("Corolla", &f.manufacturer_id, &[])).await.unwrap();
        f.service.create_car(form("Camry", &f.manufacturer_id, &[])).await.unwrap();

        let found = f
            .service
            .list_cars(CarSearchForm { model: Some("coro".into()) })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let updated = f
            .service
            .update_car(&car.id, form("Corolla Cross", &f.manufacturer_id, &f.driver_ids[..1]))
            .await
            .unwrap();
        assert_eq!(updated.model, "Corolla Cross");
        assert_eq!(updated.drivers.len(), 1);

        f.service.delete_car(&car.id).await.unwrap();
        assert!(f.service.get_car(&car.id).await.unwrap().is_none());
    }
}
