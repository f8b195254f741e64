pub use wheel::{WheelFilename, WheelFilenameError};

mod split;
mod wheel;
