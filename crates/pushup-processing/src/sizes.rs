/// Named bounding box for one resized variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub name: &'static str,
    pub max_width: u32,
    pub max_height: u32,
}

impl SizeSpec {
    const fn new(name: &'static str, edge: u32) -> Self {
        SizeSpec {
            name,
            max_width: edge,
            max_height: edge,
        }
    }
}

/// Variants produced for every upload, smallest first. Responses list them in this order.
pub const SIZES: [SizeSpec; 6] = [
    SizeSpec::new("t", 100),
    SizeSpec::new("s", 300),
    SizeSpec::new("m", 500),
    SizeSpec::new("l", 800),
    SizeSpec::new("xl", 1000),
    SizeSpec::new("xxl", 1200),
];
