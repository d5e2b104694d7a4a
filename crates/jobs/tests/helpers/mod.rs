mod mock_rotator;

pub use mock_rotator::*;
