mod helpers;
mod load_catalog;
mod reconstruct_village;

pub use load_catalog::LoadCatalogHandler;
pub use reconstruct_village::ReconstructVillageHandler;
