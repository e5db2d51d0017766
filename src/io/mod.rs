// Purpose - external interfaces: getting samples in and rendered audio out

pub mod wav;

pub use wav::LoadError;
