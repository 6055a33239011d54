//! 업종 분류 도메인 모델.

pub mod classification;
pub mod corp;
pub mod industry;
pub mod ksic;

pub use classification::*;
pub use corp::*;
pub use industry::*;
pub use ksic::*;
