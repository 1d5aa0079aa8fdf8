//! Visibility Bank - all detectors of a page

use std::collections::HashMap;

use parallax_core::{ParallaxError, ParallaxResult, SectionDescriptor, SectionId};

use crate::{visible_fraction, Rect, SectionEntered, VisibilityDetector, Viewport};

/// Measured document-space rects of the page sections
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    rects: Vec<(SectionId, Rect)>,
}

impl PageLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack sections top to bottom, each `height` tall and `width` wide,
    /// starting at `top`
    pub fn stacked<'a, I>(sections: I, top: f32, height: f32, width: f32) -> Self
    where
        I: IntoIterator<Item = &'a SectionId>,
    {
        let mut layout = Self::new();
        let mut y = top;
        for id in sections {
            layout.set(id.clone(), Rect::band(y, y + height, width));
            y += height;
        }
        layout
    }

    /// Insert or replace the rect of a section
    pub fn set(&mut self, section: SectionId, rect: Rect) {
        match self.rects.iter_mut().find(|(id, _)| *id == section) {
            Some(entry) => entry.1 = rect,
            None => self.rects.push((section, rect)),
        }
    }

    pub fn get(&self, section: &str) -> Option<&Rect> {
        self.rects
            .iter()
            .find(|(id, _)| id.as_str() == section)
            .map(|(_, rect)| rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionId, &Rect)> {
        self.rects.iter().map(|(id, rect)| (id, rect))
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Detectors for every declared section, in declaration order
#[derive(Debug, Clone, Default)]
pub struct VisibilityBank {
    detectors: Vec<VisibilityDetector>,
    index: HashMap<SectionId, usize>,
}

impl VisibilityBank {
    pub fn new(descriptors: &[SectionDescriptor]) -> Self {
        let mut bank = Self::default();
        for descriptor in descriptors {
            bank.register(descriptor);
        }
        bank
    }

    /// Add a detector for a section. Re-registering an id replaces its
    /// threshold and resets its edge state.
    pub fn register(&mut self, descriptor: &SectionDescriptor) {
        let detector = VisibilityDetector::from_descriptor(descriptor);
        match self.index.get(&descriptor.id) {
            Some(&i) => self.detectors[i] = detector,
            None => {
                self.index.insert(descriptor.id.clone(), self.detectors.len());
                self.detectors.push(detector);
            }
        }
    }

    /// Feed a visible-area fraction for one section
    pub fn sample(&mut self, section: &str, fraction: f32) -> ParallaxResult<Option<SectionEntered>> {
        let i = *self
            .index
            .get(section)
            .ok_or_else(|| ParallaxError::UnknownSection(SectionId::new(section)))?;
        Ok(self.detectors[i].sample(fraction))
    }

    /// Evaluate every section present in `layout` against `viewport`.
    ///
    /// Entries are returned in declaration order. Sections missing from the
    /// layout keep their previous state. The whole pass is rejected, without
    /// touching any detector, if the layout names an undeclared section.
    pub fn observe(&mut self, viewport: &Viewport, layout: &PageLayout) -> ParallaxResult<Vec<SectionEntered>> {
        if let Some((unknown, _)) = layout.iter().find(|(id, _)| !self.index.contains_key(*id)) {
            return Err(ParallaxError::UnknownSection(unknown.clone()));
        }

        let mut entered = Vec::new();
        for detector in &mut self.detectors {
            let Some(rect) = layout.get(detector.section().as_str()) else {
                continue;
            };
            if !rect.is_finite() {
                continue;
            }
            if let Some(event) = detector.sample(visible_fraction(rect, viewport)) {
                entered.push(event);
            }
        }
        Ok(entered)
    }

    pub fn detector(&self, section: &str) -> Option<&VisibilityDetector> {
        self.index.get(section).map(|&i| &self.detectors[i])
    }

    pub fn detectors(&self) -> impl Iterator<Item = &VisibilityDetector> {
        self.detectors.iter()
    }

    /// Sections currently above their threshold
    pub fn visible_sections(&self) -> impl Iterator<Item = &SectionId> {
        self.detectors
            .iter()
            .filter(|d| d.is_visible())
            .map(VisibilityDetector::section)
    }

    pub fn has_entered(&self, section: &str) -> bool {
        self.detector(section).is_some_and(VisibilityDetector::has_entered)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}
