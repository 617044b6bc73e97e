//! Registry of drawdown models keyed by identifier.

use crate::boundary::Bounded;
use crate::double_porosity::DoublePorosity;
use crate::error::{ModelError, ModelResult};
use crate::ext_theis::{ExtTheis2d, ExtTheis3d};
use crate::leaky::{Hantush, HantushIntegral};
use crate::theis::Theis;
use crate::traits::{RepresentationKind, Solution};
use crate::wellbore::WellboreStorage;
use crate::zoned::Zoned;
use std::fmt;
use std::sync::Arc;

/// Summary of one registered model, as returned by `SolutionCatalog::list`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelInfo {
    pub id: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub required_parameters: &'static [&'static str],
    pub representation: RepresentationKind,
}

impl ModelInfo {
    fn of(solution: &dyn Solution) -> Self {
        Self {
            id: solution.id(),
            aliases: solution.aliases(),
            description: solution.description(),
            required_parameters: solution.required_parameters(),
            representation: solution.representation().kind(),
        }
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.id.contains(&query)
            || self.description.to_ascii_lowercase().contains(&query)
            || self.aliases.iter().any(|alias| alias.contains(&query))
    }
}

/// Identifiers map to shared, immutable solutions; lookups are
/// case-insensitive and accept aliases.
#[derive(Clone)]
pub struct SolutionCatalog {
    entries: Vec<Arc<dyn Solution>>,
}

impl SolutionCatalog {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Catalog with every built-in model.
    pub fn standard() -> Self {
        let builtins: [Arc<dyn Solution>; 9] = [
            Arc::new(Theis),
            Arc::new(Hantush),
            Arc::new(HantushIntegral),
            Arc::new(DoublePorosity),
            Arc::new(Bounded),
            Arc::new(Zoned),
            Arc::new(WellboreStorage),
            Arc::new(ExtTheis2d),
            Arc::new(ExtTheis3d),
        ];
        Self {
            entries: builtins.into(),
        }
    }

    /// Add a model. Fails if its id or any alias is already taken.
    pub fn register(&mut self, solution: Arc<dyn Solution>) -> ModelResult<()> {
        let names = std::iter::once(solution.id()).chain(solution.aliases().iter().copied());
        for name in names {
            if self.find(name).is_some() {
                return Err(ModelError::DuplicateModel {
                    id: name.to_string(),
                });
            }
        }
        self.entries.push(solution);
        Ok(())
    }

    pub fn get(&self, id: &str) -> ModelResult<Arc<dyn Solution>> {
        self.find(id).cloned().ok_or_else(|| ModelError::UnknownModel {
            id: id.to_string(),
        })
    }

    fn find(&self, id: &str) -> Option<&Arc<dyn Solution>> {
        let id = id.trim();
        self.entries.iter().find(|s| {
            s.id().eq_ignore_ascii_case(id) || s.aliases().iter().any(|a| a.eq_ignore_ascii_case(id))
        })
    }

    /// Registered models in registration order.
    pub fn list(&self) -> Vec<ModelInfo> {
        self.entries.iter().map(|s| ModelInfo::of(s.as_ref())).collect()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|s| s.id()).collect()
    }

    pub fn search(&self, query: &str) -> Vec<ModelInfo> {
        self.list()
            .into_iter()
            .filter(|info| info.matches_query(query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SolutionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for SolutionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolutionCatalog")
            .field("ids", &self.ids())
            .finish()
    }
}
