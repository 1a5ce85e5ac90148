pub mod xml_utils;

pub use xml_utils::{build_soap_envelope, parse_xml_response, to_snake_case, SoapCall};
