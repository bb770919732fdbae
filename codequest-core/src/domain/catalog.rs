use crate::domain::{builtin, Activity, ActivityId, ActivityView, CompletionRecord};
use crate::games::GameSpecError;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate activity id: {0}")]
    DuplicateId(ActivityId),

    #[error("Activity ids start at 1")]
    ZeroId,

    #[error("Activity {0} awards no points")]
    ZeroPoints(ActivityId),

    #[error("Activity {id} has invalid game content: {source}")]
    InvalidGame {
        id: ActivityId,
        source: GameSpecError,
    },
}

/// Read-only, ordered list of activities
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
}

impl ActivityCatalog {
    /// Build a catalog, rejecting duplicate ids and invalid game content
    pub fn new(activities: Vec<Activity>) -> Result<Self, CatalogError> {
        let catalog = Self { activities };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The bundled activity set
    pub fn builtin() -> Self {
        Self {
            activities: builtin::activities(),
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for activity in &self.activities {
            if activity.id == 0 {
                return Err(CatalogError::ZeroId);
            }
            if !seen.insert(activity.id) {
                return Err(CatalogError::DuplicateId(activity.id));
            }
            if activity.points == 0 {
                return Err(CatalogError::ZeroPoints(activity.id));
            }
            activity
                .game
                .validate()
                .map_err(|source| CatalogError::InvalidGame {
                    id: activity.id,
                    source,
                })?;
        }
        Ok(())
    }

    pub fn get(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Activity> {
        self.activities
            .iter()
            .filter(move |a| a.category.eq_ignore_ascii_case(category))
    }

    /// Distinct categories in catalog order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for activity in &self.activities {
            if !categories.contains(&activity.category.as_str()) {
                categories.push(&activity.category);
            }
        }
        categories
    }

    /// Sum of all points on offer
    pub fn total_points(&self) -> u64 {
        self.activities.iter().map(|a| u64::from(a.points)).sum()
    }

    /// Card records in catalog order
    pub fn views(&self, record: &CompletionRecord) -> Vec<ActivityView> {
        self.activities
            .iter()
            .map(|a| a.view(record.is_completed(a.id)))
            .collect()
    }
}

impl Default for ActivityCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{GameKind, GameSpec, PairsMemorySpec};

    fn pairs(id: ActivityId) -> Activity {
        Activity::new(
            id,
            "Pairs",
            GameSpec::PairsMemory(PairsMemorySpec::new(&["a", "b"])),
        )
    }

    #[test]
    fn test_builtin_is_valid() {
        let catalog = ActivityCatalog::builtin();
        assert_eq!(catalog.validate(), Ok(()));
        assert_eq!(catalog.len(), 14);
    }

    #[test]
    fn test_builtin_ids_are_dense() {
        let catalog = ActivityCatalog::builtin();
        let ids: Vec<ActivityId> = catalog.iter().map(|a| a.id).collect();
        assert_eq!(ids, (1..=14).collect::<Vec<_>>());
    }

    #[test]
    fn test_builtin_covers_every_template() {
        let catalog = ActivityCatalog::builtin();
        for kind in [
            GameKind::TimedMatch,
            GameKind::SequenceRecall,
            GameKind::PairsMemory,
            GameKind::DragClassify,
            GameKind::SingleShot,
        ] {
            assert!(
                catalog.iter().any(|a| a.game_kind() == kind),
                "no activity uses {}",
                kind
            );
        }
    }

    #[test]
    fn test_get() {
        let catalog = ActivityCatalog::builtin();
        assert_eq!(catalog.get(1).map(|a| a.points), Some(10));
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(15).is_none());
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = ActivityCatalog::new(vec![pairs(1), pairs(1)]);
        assert_eq!(result, Err(CatalogError::DuplicateId(1)));
    }

    #[test]
    fn test_rejects_zero_id_and_points() {
        assert_eq!(
            ActivityCatalog::new(vec![pairs(0)]),
            Err(CatalogError::ZeroId)
        );
        assert_eq!(
            ActivityCatalog::new(vec![pairs(2).with_points(0)]),
            Err(CatalogError::ZeroPoints(2))
        );
    }

    #[test]
    fn test_rejects_invalid_game() {
        let broken = Activity::new(
            4,
            "Broken",
            GameSpec::PairsMemory(PairsMemorySpec::new(&[])),
        );
        assert!(matches!(
            ActivityCatalog::new(vec![broken]),
            Err(CatalogError::InvalidGame { id: 4, .. })
        ));
    }

    #[test]
    fn test_categories_and_lookup() {
        let catalog = ActivityCatalog::builtin();
        let categories = catalog.categories();
        assert!(categories.contains(&"Programming"));

        let programming: Vec<_> = catalog.by_category("programming").collect();
        assert!(!programming.is_empty());
        assert!(programming.iter().all(|a| a.category == "Programming"));
    }

    #[test]
    fn test_views_mark_completed() {
        let catalog = ActivityCatalog::builtin();
        let mut record = CompletionRecord::new();
        record.complete_id(&catalog, 2).unwrap();

        let views = catalog.views(&record);
        assert_eq!(views.len(), catalog.len());
        assert!(views[1].completed);
        assert!(!views[0].completed);
    }
}
