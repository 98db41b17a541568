//! Grouping of frames into animations by frame-name prefix

use std::collections::HashMap;

use super::types::Animation;

/// Derive the animation id of a frame name
///
/// The id is the longest prefix that contains no decimal digit.
pub fn animation_id(frame_name: &str) -> &str {
    let end = frame_name
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(frame_name.len());
    &frame_name[..end]
}

/// Ordered animations plus a lookup by name
///
/// When a name occurs in several non-contiguous runs, every run becomes its
/// own animation and the lookup points at the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationSet {
    animations: Vec<Animation>,
    lookup: HashMap<String, usize>,
}

impl AnimationSet {
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Animation> {
        self.animations.get(index)
    }

    /// Index of the first animation with this name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn as_slice(&self) -> &[Animation] {
        &self.animations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Animation> {
        self.animations.iter()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Animation> {
        self.animations.get_mut(index)
    }

    fn push(&mut self, name: &str, start_frame: usize, end_frame: usize) {
        self.lookup
            .entry(name.to_string())
            .or_insert(self.animations.len());
        self.animations.push(Animation {
            name: name.to_string(),
            start_frame,
            end_frame,
            looping: true,
        });
    }
}

/// Group an ordered list of frame names into animations
///
/// Consecutive frames with the same [`animation_id`] form one animation.
/// Every animation is looping; the file has no way to say otherwise.
pub fn segment_animations<I, S>(frame_names: I) -> AnimationSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = AnimationSet::default();
    let mut current: Option<(String, usize, usize)> = None;

    for (index, name) in frame_names.into_iter().enumerate() {
        let id = animation_id(name.as_ref());
        if let Some((current_id, _, end)) = current.as_mut()
            && *current_id == id
        {
            *end = index;
            continue;
        }

        if let Some((finished, start, end)) = current.replace((id.to_string(), index, index)) {
            set.push(&finished, start, end);
        }
    }

    if let Some((finished, start, end)) = current {
        set.push(&finished, start, end);
    }

    set
}
