pub mod credentials;
pub mod image_reference;
pub mod policy;
pub mod scan_summary;
pub mod severity;
pub mod vulnerability_distribution;
