pub mod scan_target;

pub use scan_target::ScanTargetUseCase;
