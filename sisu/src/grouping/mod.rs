//! Clasificación de ramos en 교과(군).
//!
//! - `mapping`: mapeo estático ramo -> 교과(군) (JSON)
//! - `rules`: tabla ordenada de reglas de colapso
//! - `resolver`: aplica mapeo + reglas a los ramos de un docente

pub mod mapping;
pub mod resolver;
pub mod rules;

pub use mapping::{MappingLoad, SubjectGroupMapping, OTHER_GROUP};
pub use resolver::{ResolvedLabel, SubjectGroupResolver};
pub use rules::{GroupRule, GroupRuleTable};
