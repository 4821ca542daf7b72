use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Payload returned by the API root.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    pub message: String,
}

impl Welcome {
    pub const MESSAGE: &'static str = "ONE Aviation Resources API";
}

impl Default for Welcome {
    fn default() -> Self {
        Self { message: Self::MESSAGE.to_string() }
    }
}
