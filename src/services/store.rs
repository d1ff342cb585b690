// src/services/store.rs
//! In-memory relational store for the fleet. All tables sit behind one lock,
//! so every method on [`Tables`] runs atomically under the guard that reached it.

use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    errors::{TaxiError, TaxiResult},
    forms::{FleetLookup, INVALID_CHOICE_MESSAGE, validate_license_number},
    models::{Car, Driver, Manufacturer},
    utils::id_generator::{IdType, WithGeneratedId},
};

#[derive(Debug, Default)]
pub struct Tables {
    manufacturers: HashMap<String, Manufacturer>,
    cars: HashMap<String, Car>,
    drivers: HashMap<String, Driver>,
    // (car_id, driver_id)
    car_drivers: BTreeSet<(String, String)>,
}

#[derive(Debug, Default)]
pub struct FleetStore {
    tables: RwLock<Tables>,
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

impl FleetLookup for Tables {
    fn manufacturer_exists(&self, id: &str) -> bool {
        self.manufacturers.contains_key(id)
    }

    fn driver_exists(&self, id: &str) -> bool {
        self.drivers.contains_key(id)
    }

    fn driver_id_by_username(&self, username: &str) -> Option<&str> {
        self.drivers
            .values()
            .find(|d| d.username == username)
            .map(|d| d.id.as_str())
    }

    fn driver_id_by_license(&self, license_number: &str) -> Option<&str> {
        self.drivers
            .values()
            .find(|d| d.license_number == license_number)
            .map(|d| d.id.as_str())
    }
}

impl Tables {
    // ---- manufacturers ----

    pub fn insert_manufacturer(&mut self, manufacturer: Manufacturer) -> Manufacturer {
        let manufacturer = manufacturer.with_generated_id(IdType::Manufacturer, |id| self.manufacturers.contains_key(id));
        self.manufacturers.insert(manufacturer.id.clone(), manufacturer.clone());
        manufacturer
    }

    pub fn manufacturer(&self, id: &str) -> Option<&Manufacturer> {
        self.manufacturers.get(id)
    }

    /// Every manufacturer in natural (name) order.
    pub fn manufacturers(&self) -> Vec<&Manufacturer> {
        let mut all: Vec<_> = self.manufacturers.values().collect();
        all.sort_by(|a, b| a.natural_cmp(b));
        all
    }

    pub fn update_manufacturer(&mut self, id: &str, name: String, country: String) -> TaxiResult<Manufacturer> {
        let manufacturer = self
            .manufacturers
            .get_mut(id)
            .ok_or_else(|| TaxiError::manufacturer_not_found(id))?;
        manufacturer.name = name;
        manufacturer.country = country;
        manufacturer.updated_at = Utc::now();
        Ok(manufacturer.clone())
    }

    /// Removes the manufacturer and, by cascade, its cars and their driver links.
    /// Returns the ids of the cars that went with it.
    pub fn delete_manufacturer(&mut self, id: &str) -> TaxiResult<Vec<String>> {
        self.manufacturers
            .remove(id)
            .ok_or_else(|| TaxiError::manufacturer_not_found(id))?;

        let owned: Vec<String> = self
            .cars
            .values()
            .filter(|c| c.manufacturer_id == id)
            .map(|c| c.id.clone())
            .collect();
        for car_id in &owned {
            self.cars.remove(car_id);
            self.car_drivers.retain(|(c, _)| c != car_id);
        }
        Ok(owned)
    }

    // ---- cars ----

    /// Inserts a car after re-checking its references under the current guard.
    pub fn insert_car(&mut self, car: Car, driver_ids: &[String]) -> TaxiResult<Car> {
        self.check_car_references(&car.manufacturer_id, driver_ids)?;
        let car = car.with_generated_id(IdType::Car, |id| self.cars.contains_key(id));
        for driver_id in driver_ids {
            self.car_drivers.insert((car.id.clone(), driver_id.clone()));
        }
        self.cars.insert(car.id.clone(), car.clone());
        Ok(car)
    }

    pub fn car(&self, id: &str) -> Option<&Car> {
        self.cars.get(id)
    }

    /// Every car, ordered by model then id.
    pub fn cars(&self) -> Vec<&Car> {
        let mut all: Vec<_> = self.cars.values().collect();
        all.sort_by(|a, b| a.model.cmp(&b.model).then_with(|| a.id.cmp(&b.id)));
        all
    }

    /// Replaces model, manufacturer and the full driver set of a car.
    pub fn update_car(
        &mut self,
        id: &str,
        model: String,
        manufacturer_id: String,
        driver_ids: &[String],
    ) -> TaxiResult<Car> {
        if !self.cars.contains_key(id) {
            return Err(TaxiError::car_not_found(id));
        }
        self.check_car_references(&manufacturer_id, driver_ids)?;

        self.car_drivers.retain(|(c, _)| c != id);
        for driver_id in driver_ids {
            self.car_drivers.insert((id.to_string(), driver_id.clone()));
        }

        let car = self.cars.get_mut(id).ok_or_else(|| TaxiError::car_not_found(id))?;
        car.model = model;
        car.manufacturer_id = manufacturer_id;
        car.updated_at = Utc::now();
        Ok(car.clone())
    }

    pub fn delete_car(&mut self, id: &str) -> TaxiResult<Car> {
        let car = self.cars.remove(id).ok_or_else(|| TaxiError::car_not_found(id))?;
        self.car_drivers.retain(|(c, _)| c != id);
        Ok(car)
    }

    fn check_car_references(&self, manufacturer_id: &str, driver_ids: &[String]) -> TaxiResult<()> {
        if !self.manufacturers.contains_key(manufacturer_id) {
            return Err(TaxiError::validation_error("manufacturer", INVALID_CHOICE_MESSAGE));
        }
        if let Some(missing) = driver_ids.iter().find(|d| !self.drivers.contains_key(*d)) {
            return Err(TaxiError::validation_error(
                "drivers",
                format!("Select a valid choice. {} is not one of the available choices.", missing),
            ));
        }
        Ok(())
    }

    // ---- car <-> driver ----

    /// Links a driver to a car. Returns false when the link already existed.
    pub fn assign_driver(&mut self, car_id: &str, driver_id: &str) -> TaxiResult<bool> {
        self.check_link_ends(car_id, driver_id)?;
        Ok(self.car_drivers.insert((car_id.to_string(), driver_id.to_string())))
    }

    /// Unlinks a driver from a car. Returns false when there was no link.
    pub fn unassign_driver(&mut self, car_id: &str, driver_id: &str) -> TaxiResult<bool> {
        self.check_link_ends(car_id, driver_id)?;
        Ok(self.car_drivers.remove(&(car_id.to_string(), driver_id.to_string())))
    }

    fn check_link_ends(&self, car_id: &str, driver_id: &str) -> TaxiResult<()> {
        if !self.cars.contains_key(car_id) {
            return Err(TaxiError::car_not_found(car_id));
        }
        if !self.drivers.contains_key(driver_id) {
            return Err(TaxiError::driver_not_found(driver_id));
        }
        Ok(())
    }

    /// Drivers of a car, ordered by username.
    pub fn drivers_of_car(&self, car_id: &str) -> Vec<&Driver> {
        let mut drivers: Vec<_> = self
            .car_drivers
            .iter()
            .filter(|(c, _)| c == car_id)
            .filter_map(|(_, d)| self.drivers.get(d))
            .collect();
        drivers.sort_by(|a, b| a.username.cmp(&b.username));
        drivers
    }

    /// Cars of a driver, ordered by model.
    pub fn cars_of_driver(&self, driver_id: &str) -> Vec<&Car> {
        let mut cars: Vec<_> = self
            .car_drivers
            .iter()
            .filter(|(_, d)| d == driver_id)
            .filter_map(|(c, _)| self.cars.get(c))
            .collect();
        cars.sort_by(|a, b| a.model.cmp(&b.model).then_with(|| a.id.cmp(&b.id)));
        cars
    }

    // ---- drivers ----

    /// Inserts a driver. The license format and the uniqueness of username and
    /// license number are enforced here as well as in the forms.
    pub fn insert_driver(&mut self, driver: Driver) -> TaxiResult<Driver> {
        validate_license_number(&driver.license_number)?;
        if self.driver_id_by_username(&driver.username).is_some() {
            return Err(TaxiError::validation_error("username", "A user with that username already exists."));
        }
        if self.driver_id_by_license(&driver.license_number).is_some() {
            return Err(TaxiError::validation_error(
                "license_number",
                "Driver with this license number already exists.",
            ));
        }
        let driver = driver.with_generated_id(IdType::Driver, |id| self.drivers.contains_key(id));
        self.drivers.insert(driver.id.clone(), driver.clone());
        Ok(driver)
    }

    pub fn driver(&self, id: &str) -> Option<&Driver> {
        self.drivers.get(id)
    }

    /// Every driver, ordered by username.
    pub fn drivers(&self) -> Vec<&Driver> {
        let mut all: Vec<_> = self.drivers.values().collect();
        all.sort_by(|a, b| a.username.cmp(&b.username));
        all
    }

    pub fn update_driver_license(&mut self, id: &str, license_number: String) -> TaxiResult<Driver> {
        validate_license_number(&license_number)?;
        if !self.drivers.contains_key(id) {
            return Err(TaxiError::driver_not_found(id));
        }
        if self.driver_id_by_license(&license_number).is_some_and(|holder| holder != id) {
            return Err(TaxiError::validation_error(
                "license_number",
                "Driver with this license number already exists.",
            ));
        }
        let driver = self.drivers.get_mut(id).ok_or_else(|| TaxiError::driver_not_found(id))?;
        driver.license_number = license_number;
        driver.updated_at = Utc::now();
        Ok(driver.clone())
    }

    /// Removes a driver and its car links; the cars stay.
    pub fn delete_driver(&mut self, id: &str) -> TaxiResult<Driver> {
        let driver = self.drivers.remove(id).ok_or_else(|| TaxiError::driver_not_found(id))?;
        self.car_drivers.retain(|(_, d)| d != id);
        Ok(driver)
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (self.drivers.len(), self.cars.len(), self.manufacturers.len())
    }
}
