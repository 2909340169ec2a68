// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Ordered, contiguous section layout of a track.
//!
//! Lookups take the resolved track duration: every section end is clamped
//! to it, and the last section's stored end (a placeholder) is replaced
//! by it outright.

use thiserror::Error;

use super::section::{Section, SectionType};

/// Timeline validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("timeline has no sections")]
    Empty,

    #[error("first section must start at 0, found {0}")]
    BadStart(f64),

    #[error("section {index} has non-finite bounds")]
    NonFinite { index: usize },

    #[error("section {index} ends at {end} before it starts at {start}")]
    Inverted { index: usize, start: f64, end: f64 },

    #[error("section {index} starts at {start} but the previous section ends at {previous_end}")]
    NotContiguous {
        index: usize,
        start: f64,
        previous_end: f64,
    },
}

/// Immutable section layout of one track
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    sections: Vec<Section>,
}

impl Timeline {
    /// Build a timeline, checking that sections start at 0 and are contiguous
    pub fn new(sections: Vec<Section>) -> Result<Self, TimelineError> {
        let first = sections.first().ok_or(TimelineError::Empty)?;
        if first.start != 0.0 {
            return Err(TimelineError::BadStart(first.start));
        }

        for (index, section) in sections.iter().enumerate() {
            if !section.start.is_finite() || !section.end.is_finite() {
                return Err(TimelineError::NonFinite { index });
            }
            if section.end <= section.start {
                return Err(TimelineError::Inverted {
                    index,
                    start: section.start,
                    end: section.end,
                });
            }
            if index > 0 {
                let previous_end = sections[index - 1].end;
                if section.start != previous_end {
                    return Err(TimelineError::NotContiguous {
                        index,
                        start: section.start,
                        previous_end,
                    });
                }
            }
        }

        Ok(Self { sections })
    }

    /// Mozart, Piano Sonata No. 11, K. 331, III. "Rondo alla Turca"
    pub fn rondo_alla_turca() -> Self {
        use SectionType::*;
        Self {
            sections: vec![
                Section::new(A, 0.0, 22.0),
                Section::new(B, 22.0, 45.0),
                Section::new(C, 45.0, 68.0),
                Section::new(B, 68.0, 88.0),
                Section::new(A, 88.0, 110.0),
                Section::new(B, 110.0, 132.0),
                // Placeholder end, replaced by the real duration at lookup time
                Section::new(Coda, 132.0, 300.0),
            ],
        }
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false for a validated timeline
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get section at index
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Get all sections
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// End of a section once the track duration is known
    pub fn effective_end(&self, index: usize, duration: f64) -> Option<f64> {
        let section = self.sections.get(index)?;
        if index + 1 == self.sections.len() {
            Some(duration)
        } else {
            Some(section.end.min(duration))
        }
    }

    /// Index of the section playing at `time`
    ///
    /// Intervals are `[start, end)`, so a boundary belongs to the later
    /// section. Returns `None` before 0, at or past `duration`, and for NaN.
    pub fn section_at(&self, time: f64, duration: f64) -> Option<usize> {
        if !(time >= 0.0 && time < duration) {
            return None;
        }

        // Sections are sorted by start; find the last one starting at or before `time`
        let candidate = self
            .sections
            .partition_point(|s| s.start <= time)
            .checked_sub(1)?;

        let end = self.effective_end(candidate, duration)?;
        if self.sections[candidate].contains(time, end) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Section playing at `time`, with its index
    pub fn section_at_with_index(&self, time: f64, duration: f64) -> Option<(usize, &Section)> {
        let index = self.section_at(time, duration)?;
        Some((index, &self.sections[index]))
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::rondo_alla_turca()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionType::*;

    fn abc() -> Timeline {
        Timeline::new(vec![
            Section::new(A, 0.0, 22.0),
            Section::new(B, 22.0, 45.0),
            Section::new(C, 45.0, 68.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_section_at_basic() {
        let timeline = abc();
        assert_eq!(timeline.section_at(0.0, 68.0), Some(0));
        assert_eq!(timeline.section_at(10.0, 68.0), Some(0));
        assert_eq!(timeline.section_at(50.0, 68.0), Some(2));
    }

    #[test]
    fn test_boundary_belongs_to_later_section() {
        let timeline = abc();
        assert_eq!(timeline.section_at(21.999, 68.0), Some(0));
        assert_eq!(timeline.section_at(22.0, 68.0), Some(1));
        assert_eq!(timeline.section_at(45.0, 68.0), Some(2));
    }

    #[test]
    fn test_out_of_range() {
        let timeline = abc();
        assert_eq!(timeline.section_at(-0.01, 68.0), None);
        assert_eq!(timeline.section_at(68.0, 68.0), None);
        assert_eq!(timeline.section_at(500.0, 68.0), None);
        assert_eq!(timeline.section_at(f64::NAN, 68.0), None);
    }

    #[test]
    fn test_placeholder_end_replaced_by_duration() {
        let timeline = Timeline::rondo_alla_turca();
        // Shorter than the placeholder
        assert_eq!(timeline.section_at(180.0, 190.0), Some(6));
        assert_eq!(timeline.section_at(190.0, 190.0), None);
        // Longer than the placeholder
        assert_eq!(timeline.section_at(310.0, 320.0), Some(6));
        assert_eq!(timeline.effective_end(6, 190.0), Some(190.0));
    }

    #[test]
    fn test_middle_sections_clamped_to_duration() {
        let timeline = abc();
        // Track shorter than the layout: C is cut at 50
        assert_eq!(timeline.effective_end(1, 30.0), Some(30.0));
        assert_eq!(timeline.section_at(35.0, 30.0), None);
        assert_eq!(timeline.section_at(25.0, 30.0), Some(1));
    }

    #[test]
    fn test_every_time_maps_to_exactly_one_section() {
        let timeline = Timeline::rondo_alla_turca();
        let duration = 185.5;
        let mut t = 0.0;
        while t < duration {
            let hits = (0..timeline.len())
                .filter(|&i| {
                    let s = timeline.get(i).unwrap();
                    s.contains(t, timeline.effective_end(i, duration).unwrap())
                })
                .count();
            assert_eq!(hits, 1, "time {}", t);
            assert!(timeline.section_at(t, duration).is_some());
            t += 0.25;
        }
    }

    #[test]
    fn test_validation() {
        assert_eq!(Timeline::new(vec![]), Err(TimelineError::Empty));
        assert_eq!(
            Timeline::new(vec![Section::new(A, 1.0, 5.0)]),
            Err(TimelineError::BadStart(1.0))
        );
        assert!(matches!(
            Timeline::new(vec![Section::new(A, 0.0, 5.0), Section::new(B, 6.0, 9.0)]),
            Err(TimelineError::NotContiguous { index: 1, .. })
        ));
        assert!(matches!(
            Timeline::new(vec![Section::new(A, 0.0, 5.0), Section::new(B, 4.0, 9.0)]),
            Err(TimelineError::NotContiguous { index: 1, .. })
        ));
        assert!(matches!(
            Timeline::new(vec![Section::new(A, 0.0, 0.0)]),
            Err(TimelineError::Inverted { index: 0, .. })
        ));
        assert!(matches!(
            Timeline::new(vec![Section::new(A, 0.0, f64::INFINITY)]),
            Err(TimelineError::NonFinite { index: 0 })
        ));
    }

    #[test]
    fn test_builtin_timeline_is_valid() {
        let builtin = Timeline::rondo_alla_turca();
        let rebuilt = Timeline::new(builtin.sections().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), 7);
        assert_eq!(rebuilt.get(6).unwrap().kind, Coda);
    }
}
