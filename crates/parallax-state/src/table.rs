//! Pose table and validated page setup

use std::collections::{HashMap, HashSet};

use parallax_core::{ParallaxError, ParallaxResult, Pose, SectionDescriptor, SectionId};

/// Static mapping from section id to target pose
///
/// INVARIANT: the home id always has an entry and every stored pose is valid
#[derive(Debug, Clone)]
pub struct PoseTable {
    home: SectionId,
    poses: HashMap<SectionId, Pose>,
}

impl PoseTable {
    /// Create a table holding only the home pose
    pub fn new(home: SectionId, home_pose: Pose) -> ParallaxResult<Self> {
        check_pose(&home, &home_pose)?;
        let mut poses = HashMap::new();
        poses.insert(home.clone(), home_pose);
        Ok(PoseTable { home, poses })
    }

    /// Build from entries that are known to be valid and include `home`
    pub(crate) fn from_validated(home: SectionId, poses: HashMap<SectionId, Pose>) -> Self {
        PoseTable { home, poses }
    }

    /// Insert or replace the pose of a section
    pub fn insert(&mut self, section: SectionId, pose: Pose) -> ParallaxResult<()> {
        check_pose(&section, &pose)?;
        self.poses.insert(section, pose);
        Ok(())
    }

    pub fn get(&self, section: &str) -> Option<&Pose> {
        self.poses.get(section)
    }

    pub fn contains(&self, section: &str) -> bool {
        self.poses.contains_key(section)
    }

    pub fn home(&self) -> &SectionId {
        &self.home
    }

    pub fn home_pose(&self) -> Pose {
        // present by construction
        self.poses.get(&self.home).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionId, &Pose)> {
        self.poses.iter()
    }
}

fn check_pose(section: &SectionId, pose: &Pose) -> ParallaxResult<()> {
    if section.is_empty() {
        return Err(ParallaxError::EmptySectionId);
    }
    if !pose.is_finite() {
        return Err(ParallaxError::InvalidPose {
            section: section.clone(),
            reason: "non-finite component",
        });
    }
    if pose.scale <= 0.0 {
        return Err(ParallaxError::InvalidPose {
            section: section.clone(),
            reason: "scale must be positive",
        });
    }
    Ok(())
}

/// Pose table plus section descriptors, checked against each other
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PageSetup {
    table: PoseTable,
    sections: Vec<SectionDescriptor>,
}

impl PageSetup {
    /// Validate a page: poses well-formed, home present, descriptors valid
    /// and unique, and every descriptor backed by a pose.
    pub fn validate<I>(home: SectionId, poses: I, sections: Vec<SectionDescriptor>) -> ParallaxResult<Self>
    where
        I: IntoIterator<Item = (SectionId, Pose)>,
    {
        let mut entries: HashMap<SectionId, Pose> = HashMap::new();
        for (section, pose) in poses {
            check_pose(&section, &pose)?;
            entries.insert(section, pose);
        }

        let home_pose = entries
            .remove(&home)
            .ok_or_else(|| ParallaxError::MissingHomePose { home: home.clone() })?;
        let mut table = PoseTable::new(home, home_pose)?;
        for (section, pose) in entries {
            table.insert(section, pose)?;
        }

        let mut seen = HashSet::new();
        for descriptor in &sections {
            descriptor.validate()?;
            if !seen.insert(descriptor.id.clone()) {
                return Err(ParallaxError::DuplicateSection(descriptor.id.clone()));
            }
            if !table.contains(descriptor.id.as_str()) {
                return Err(ParallaxError::UnknownPose {
                    section: descriptor.id.clone(),
                });
            }
        }

        tracing::debug!(
            home = %table.home(),
            poses = table.len(),
            sections = sections.len(),
            "page setup validated"
        );
        Ok(PageSetup { table, sections })
    }

    /// Assemble parts that are known to be valid (built-in catalogs)
    pub(crate) fn from_parts(table: PoseTable, sections: Vec<SectionDescriptor>) -> Self {
        PageSetup { table, sections }
    }

    pub fn table(&self) -> &PoseTable {
        &self.table
    }

    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    pub fn home(&self) -> &SectionId {
        self.table.home()
    }

    pub fn home_pose(&self) -> Pose {
        self.table.home_pose()
    }
}
