pub mod debug;
pub mod ext;
pub mod props;
