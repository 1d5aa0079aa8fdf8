//! Built-in jacket page
//!
//! The protective-jacket product page: a hero cover followed by four feature
//! sections, each turning the model to show the armor it describes.

use std::f32::consts::PI;

use parallax_core::{Pose, SectionDescriptor, SectionId, DEFAULT_VISIBILITY_THRESHOLD};

use crate::{PageSetup, PoseTable};

/// Sections of the jacket page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JacketSection {
    /// Cover, active before any feature section has been entered
    Hero,
    Shoulder,
    Elbow,
    Chest,
    Back,
}

impl JacketSection {
    /// Feature sections in page order (top to bottom)
    pub const FEATURES: [JacketSection; 4] = [
        JacketSection::Shoulder,
        JacketSection::Elbow,
        JacketSection::Chest,
        JacketSection::Back,
    ];

    pub const HOME: JacketSection = JacketSection::Hero;

    pub fn all() -> &'static [JacketSection] {
        &[
            JacketSection::Hero,
            JacketSection::Shoulder,
            JacketSection::Elbow,
            JacketSection::Chest,
            JacketSection::Back,
        ]
    }

    pub fn id(self) -> &'static str {
        match self {
            JacketSection::Hero => "hero",
            JacketSection::Shoulder => "shoulder",
            JacketSection::Elbow => "elbow",
            JacketSection::Chest => "chest",
            JacketSection::Back => "back",
        }
    }

    pub fn section_id(self) -> SectionId {
        SectionId::new(self.id())
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.id() == id)
    }

    pub fn pose(self) -> Pose {
        match self {
            JacketSection::Hero => Pose::new(0.2, 0.0, 1.0),
            JacketSection::Shoulder => Pose::new(0.6, 0.15, 1.3),
            JacketSection::Elbow => Pose::new(-0.8, -0.1, 1.4),
            JacketSection::Chest => Pose::new(0.0, 0.0, 1.5),
            // Turn all the way round to show the spine protector
            JacketSection::Back => Pose::new(PI, 0.0, 1.5),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            JacketSection::Hero => "ARMOR FOR RIDERS",
            JacketSection::Shoulder => "SHOULDER PROTECTION",
            JacketSection::Elbow => "ELBOW GUARDS",
            JacketSection::Chest => "CHEST ARMOR",
            JacketSection::Back => "BACK PROTECTION",
        }
    }

    pub fn descriptor(self) -> SectionDescriptor {
        SectionDescriptor {
            id: self.section_id(),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl PageSetup {
    /// The jacket page: hero home pose plus the four feature sections
    pub fn jacket() -> PageSetup {
        let mut poses = std::collections::HashMap::new();
        for section in JacketSection::all() {
            poses.insert(section.section_id(), section.pose());
        }
        let home = JacketSection::HOME.section_id();
        let table = PoseTable::from_validated(home, poses);
        let sections = JacketSection::FEATURES
            .iter()
            .map(|s| s.descriptor())
            .collect();
        PageSetup::from_parts(table, sections)
    }
}
