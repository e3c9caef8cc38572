use rover_core::vehicle_inputs::InputAxes;

/// Anything that can be asked for the current stick position once per
/// rendered frame.
pub trait InputSource {
    fn sample(&mut self, frame: u64) -> InputAxes;
}

// A timeline of stick positions; each one holds from its frame until the next
pub struct ScriptedInput {
    keyframes: Vec<(u64, InputAxes)>,
}

impl ScriptedInput {
    pub fn new(mut keyframes: Vec<(u64, InputAxes)>) -> ScriptedInput {
        keyframes.sort_by_key(|(frame, _)| *frame);
        ScriptedInput { keyframes }
    }

    // A short lap of the test course: straight up the ramp, a sweeping
    // right, a tighter left, a reverse out and a coast to a stop
    pub fn demo() -> ScriptedInput {
        ScriptedInput::new(vec![
            (0, InputAxes::new(1.0, 0.0)),
            (240, InputAxes::new(1.0, 0.5)),
            (420, InputAxes::new(0.8, -1.0)),
            (600, InputAxes::new(1.0, 0.0)),
            (900, InputAxes::new(0.0, 0.0)),
            (1100, InputAxes::new(-1.0, 0.3)),
            (1300, InputAxes::new(0.0, 0.0)),
        ])
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, frame: u64) -> InputAxes {
        self.keyframes
            .iter()
            .rev()
            .find(|(start, _)| *start <= frame)
            .map(|(_, axes)| *axes)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_until_next_keyframe() {
        let mut input = ScriptedInput::new(vec![
            (10, InputAxes::new(1.0, 0.0)),
            (20, InputAxes::new(0.0, -1.0)),
        ]);

        assert_eq!(input.sample(0), InputAxes::default());
        assert_eq!(input.sample(10), InputAxes::new(1.0, 0.0));
        assert_eq!(input.sample(19), InputAxes::new(1.0, 0.0));
        assert_eq!(input.sample(20), InputAxes::new(0.0, -1.0));
        assert_eq!(input.sample(5000), InputAxes::new(0.0, -1.0));
    }

    #[test]
    fn test_keyframes_are_sorted() {
        let mut input = ScriptedInput::new(vec![
            (20, InputAxes::new(0.0, 1.0)),
            (0, InputAxes::new(0.5, 0.0)),
        ]);
        assert_eq!(input.sample(15), InputAxes::new(0.5, 0.0));
    }

    #[test]
    fn test_demo_starts_on_the_throttle() {
        let mut input = ScriptedInput::demo();
        assert_eq!(input.sample(0).vertical, 1.0);
    }
}
