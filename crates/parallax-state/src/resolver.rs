//! Pose Resolver - active section to target pose
//!
//! Pure lookup, called every frame. A section without a pose resolves to the
//! home pose instead of failing.

use parallax_core::Pose;

use crate::PoseTable;

/// Outcome of a lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub pose: Pose,
    /// True when the id was missing and the home pose was substituted
    pub fallback: bool,
}

/// Target pose for the active section, home pose if unknown
#[inline]
pub fn resolve(table: &PoseTable, active: &str) -> Pose {
    resolve_detailed(table, active).pose
}

/// Like `resolve`, but reports whether the home fallback was used
pub fn resolve_detailed(table: &PoseTable, active: &str) -> Resolution {
    match table.get(active) {
        Some(pose) => Resolution {
            pose: *pose,
            fallback: false,
        },
        None => Resolution {
            pose: table.home_pose(),
            fallback: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_core::SectionId;

    fn table() -> PoseTable {
        let mut table = PoseTable::new(SectionId::new("hero"), Pose::new(0.2, 0.0, 1.0)).unwrap();
        table
            .insert(SectionId::new("chest"), Pose::new(0.0, 0.0, 1.5))
            .unwrap();
        table
    }

    #[test]
    fn test_resolve_known() {
        assert_eq!(resolve(&table(), "chest"), Pose::new(0.0, 0.0, 1.5));
        assert!(!resolve_detailed(&table(), "hero").fallback);
    }

    #[test]
    fn test_unknown_resolves_home() {
        let r = resolve_detailed(&table(), "sleeve");
        assert!(r.fallback);
        assert_eq!(r.pose, Pose::new(0.2, 0.0, 1.0));
    }
}
