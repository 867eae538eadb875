//! Faraid Inheritance Domain
//!
//! This crate implements the Islamic inheritance (Faraid) distribution
//! engine: given a deceased's family composition and a school of
//! jurisprudence, it computes the exact fractional share of the net estate
//! owed to each heir class, applying exclusion (Hajb), canonical fixed
//! shares (Ashab al-Furud), residuary absorption (Asabah), and the
//! corrective mechanisms of proportional reduction (Awl) and return (Radd).
//!
//! The engine is a pure function over value objects: no I/O, no shared
//! state, safe to invoke concurrently, and deterministic down to the bit
//! for identical inputs. All share arithmetic is exact rational arithmetic
//! from `core_kernel::Fraction`; money appears only at the boundaries.

pub mod adjustment;
pub mod blocking;
pub mod composition;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod estate;
pub mod heir;
pub mod ports;
pub mod residuary;
pub mod shares;

pub use adjustment::{Adjustment, AwlRaddAdjuster};
pub use blocking::{BlockingResolver, Exclusion};
pub use composition::FamilyComposition;
pub use distribution::{Correction, Distribution, HeirShare, ShareBasis};
pub use engine::{Calculation, FaraidEngine};
pub use error::{EstateError, FaraidError};
pub use estate::{EstateLedger, EstateResolution, WasiyyahRequest};
pub use heir::{HeirClass, Madhhab};
pub use ports::{
    inheritable_total, AssetClassification, AssetClassifier, ClassifiedAsset, ClassifierError,
};
pub use residuary::ResiduaryDistributor;
pub use shares::FixedShareAssigner;
