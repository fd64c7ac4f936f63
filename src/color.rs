/// Plain 24-bit color handed to render sinks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Rgb { r: level, g: level, b: level }
    }
}

pub const HEAD_COLOR: Rgb = Rgb::gray(255);

const GRADIENT_TOP: u8 = 220;
const GRADIENT_STEP: u8 = 40;
const GRADIENT_FLOOR: u8 = 60;

/// Color of the `index`-th segment of the initial body, lighter near the head.
pub fn body_gradient(index: usize) -> Rgb {
    let drop = (index as u32).saturating_mul(GRADIENT_STEP as u32).min((GRADIENT_TOP - GRADIENT_FLOOR) as u32);
    Rgb::gray(GRADIENT_TOP - drop as u8)
}
