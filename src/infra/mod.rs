mod component_factory_impl;
mod docker_image_repository;
mod twistcli_binary_manager;
mod twistcli_image_scanner;
mod twistcli_report;

pub use component_factory_impl::ConcreteComponentFactory;
pub use docker_image_repository::DockerImageRepository;
pub use twistcli_binary_manager::TwistcliBinaryManager;
pub use twistcli_image_scanner::TwistcliImageScanner;
pub use twistcli_report::TwistcliReportReader;
