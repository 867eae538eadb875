//! Request/Response data transfer objects

pub mod faraid;

pub use faraid::{
    AssetDto, CalculationRequest, CalculationResponse, EstateDto, FamilyDto, FractionDto,
    HeirShareDto, WasiyyahDto,
};
