//! Keyframe animation for node transforms.
//!
//! A [`TransformAnimation`] carries up to three tracks (position, rotation,
//! scale); `Scene::update_animation` samples them at the playhead time and
//! writes the result into the node's transform. This is the authoring
//! tool's timeline animation — skeletal/imported animation is the asset
//! pipeline's concern and stays outside this core.

use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
}

/// Values that a keyframe track can interpolate.
pub trait Interpolatable: Copy {
    fn interpolate(a: Self, b: Self, t: f32) -> Self;
}

impl Interpolatable for Vec3 {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a.slerp(b, t)
    }
}

/// A sorted list of keyframes over one value.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    /// Keyframe times in seconds, ascending.
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        debug_assert_eq!(times.len(), values.len());
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Samples the track at `time`, clamping outside the keyframe range.
    /// Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }

        // First index with t > time, i.e. the next keyframe.
        let next_idx = self.times.partition_point(|&t| t <= time);

        if next_idx == 0 {
            return Some(self.values[0]);
        }
        if next_idx >= self.times.len() {
            return Some(*self.values.last()?);
        }

        let prev_idx = next_idx - 1;
        match self.interpolation {
            InterpolationMode::Step => Some(self.values[prev_idx]),
            InterpolationMode::Linear => {
                let t0 = self.times[prev_idx];
                let t1 = self.times[next_idx];
                let span = t1 - t0;
                let alpha = if span > 0.0 { (time - t0) / span } else { 0.0 };
                Some(T::interpolate(
                    self.values[prev_idx],
                    self.values[next_idx],
                    alpha,
                ))
            }
        }
    }

    /// Time of the last keyframe (0 for an empty track).
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

/// Timeline animation over one node's TRS channels.
#[derive(Debug, Clone, Default)]
pub struct TransformAnimation {
    pub position: Option<KeyframeTrack<Vec3>>,
    pub rotation: Option<KeyframeTrack<Quat>>,
    pub scale: Option<KeyframeTrack<Vec3>>,
    pub looping: bool,
}

impl TransformAnimation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Longest channel duration.
    #[must_use]
    pub fn duration(&self) -> f32 {
        let d = |t: &Option<KeyframeTrack<Vec3>>| t.as_ref().map_or(0.0, KeyframeTrack::duration);
        let dr = self
            .rotation
            .as_ref()
            .map_or(0.0, KeyframeTrack::duration);
        d(&self.position).max(dr).max(d(&self.scale))
    }

    /// Maps the playhead onto this animation's local time.
    #[must_use]
    pub fn local_time(&self, time: f32) -> f32 {
        let duration = self.duration();
        if self.looping && duration > 0.0 {
            time.rem_euclid(duration)
        } else {
            time
        }
    }
}
