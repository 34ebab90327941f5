/// Inbound ports (Driving ports) - Application entry points
mod company_export_port;

pub use company_export_port::CompanyExportPort;
