//! [`MemoryCatalog`]: technologies, experiences and services held in vectors.

use std::sync::RwLock;

use folio_core::{
  Error, Result,
  experience::Experience,
  seed::{self, Catalog},
  service::Service,
  store::{CatalogRepository, sort_experiences},
  technology::{Technology, TechnologyFilter},
};

use crate::{read, write};

#[derive(Debug, Default)]
pub struct MemoryCatalog {
  technologies: RwLock<Vec<Technology>>,
  experiences:  RwLock<Vec<Experience>>,
  services:     RwLock<Vec<Service>>,
}

impl MemoryCatalog {
  /// An empty catalog.
  pub fn new() -> Self { Self::default() }

  /// A catalog pre-filled with the sample content from [`seed::catalog`].
  pub fn seeded() -> Result<Self> { Ok(Self::from_catalog(seed::catalog()?)) }

  pub fn from_catalog(catalog: Catalog) -> Self {
    Self {
      technologies: RwLock::new(catalog.technologies),
      experiences:  RwLock::new(catalog.experiences),
      services:     RwLock::new(catalog.services),
    }
  }
}

impl CatalogRepository for MemoryCatalog {
  async fn list_technologies(&self, filter: &TechnologyFilter) -> Result<Vec<Technology>> {
    let mut techs: Vec<Technology> =
      read(&self.technologies)?.iter().filter(|t| filter.matches(t)).cloned().collect();
    techs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(techs)
  }

  async fn add_technology(&self, technology: Technology) -> Result<()> {
    let mut techs = write(&self.technologies)?;
    if techs.iter().any(|t| t.name.eq_ignore_ascii_case(&technology.name)) {
      return Err(Error::conflict(format!("technology {:?} already exists", technology.name)));
    }
    techs.push(technology);
    Ok(())
  }

  async fn list_experiences(&self) -> Result<Vec<Experience>> {
    let mut experiences = read(&self.experiences)?.clone();
    sort_experiences(&mut experiences);
    Ok(experiences)
  }

  async fn current_experiences(&self) -> Result<Vec<Experience>> {
    let mut current: Vec<Experience> =
      read(&self.experiences)?.iter().filter(|e| e.is_current()).cloned().collect();
    sort_experiences(&mut current);
    Ok(current)
  }

  async fn add_experience(&self, experience: Experience) -> Result<()> {
    let mut experiences = write(&self.experiences)?;
    if experiences.iter().any(|e| e.id == experience.id) {
      return Err(Error::conflict(format!("experience {} already exists", experience.id)));
    }
    experiences.push(experience);
    Ok(())
  }

  async fn list_services(&self, active_only: bool) -> Result<Vec<Service>> {
    Ok(
      read(&self.services)?
        .iter()
        .filter(|s| !active_only || s.is_active)
        .cloned()
        .collect(),
    )
  }

  async fn add_service(&self, service: Service) -> Result<()> {
    let mut services = write(&self.services)?;
    if services.iter().any(|s| s.name.eq_ignore_ascii_case(&service.name)) {
      return Err(Error::conflict(format!("service {:?} already exists", service.name)));
    }
    services.push(service);
    Ok(())
  }
}
