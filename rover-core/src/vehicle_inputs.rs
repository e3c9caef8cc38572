// Inputs with a smaller magnitude than this are treated as released
pub const INPUT_DEADZONE: f64 = 0.01;

// Raw axes as an input device reports them, both in [-1, 1]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputAxes {
    pub vertical: f64,
    pub horizontal: f64,
}

impl InputAxes {
    pub fn new(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

// VehicleInputs is what the controller reads each physics step: the most
// recently sampled axes, clamped and sanitized
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VehicleInputs {
    pub throttle: f64,
    pub steer: f64,
}

fn sanitize_axis(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

impl VehicleInputs {
    pub fn new(throttle: f64, steer: f64) -> Self {
        Self {
            throttle: sanitize_axis(throttle),
            steer: sanitize_axis(steer),
        }
    }

    pub fn is_throttling(&self) -> bool {
        self.throttle.abs() >= INPUT_DEADZONE
    }

    pub fn is_steering(&self) -> bool {
        self.steer.abs() >= INPUT_DEADZONE
    }
}

impl From<InputAxes> for VehicleInputs {
    fn from(axes: InputAxes) -> Self {
        VehicleInputs::new(axes.vertical, axes.horizontal)
    }
}
