use common_utils::CustomResult;
use domain_types::{
    errors::ConnectorError,
    router_response_types::{
        ParsedResponse, BILLING_ID_KEY, RESPONSE_CODE_KEY, RESPONSE_MESSAGE_KEY,
    },
};
use error_stack::{report, ResultExt};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};
use serde_json::{Map, Value};

/// Element holding the web-service level status of a call.
pub const WEB_SERVICE_STATUS_ELEMENT: &str = "response";
/// Element wrapping the transactions returned by a search.
pub const SEARCH_RESULTS_ELEMENT: &str = "SearchTransactionsResult";
/// Element carrying the token of a stored card.
pub const TOKEN_ELEMENT: &str = "Token";

/// One remote procedure call, ready to be wrapped in a SOAP envelope.
#[derive(Debug)]
pub struct SoapCall<'a> {
    /// Namespace prefix applied to the action element and everything below it
    pub prefix: &'a str,
    pub action: &'a str,
    /// Leaf elements written directly under the action element, before anything else
    pub header_fields: Vec<(&'a str, &'a str)>,
    /// When set, `fields` are written inside this element instead of the action element
    pub nested_element: Option<&'a str>,
    pub fields: Vec<(&'a str, &'a str)>,
}

/// Serialises `call` into a SOAP 1.1 envelope, prefixed with an XML declaration.
///
/// `namespaces` are declared on the envelope element in the given order. All
/// text content is escaped.
pub fn build_soap_envelope(
    namespaces: &[(&str, &str)],
    call: &SoapCall<'_>,
) -> CustomResult<String, ConnectorError> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .change_context(ConnectorError::RequestEncodingFailed)?;

    let mut envelope = BytesStart::new("env:Envelope");
    for (name, uri) in namespaces {
        envelope.push_attribute((*name, *uri));
    }
    writer
        .write_event(Event::Start(envelope))
        .change_context(ConnectorError::RequestEncodingFailed)?;
    write_start(&mut writer, "env:Body")?;

    let action = format!("{}:{}", call.prefix, call.action);
    write_start(&mut writer, &action)?;
    for (name, value) in &call.header_fields {
        write_leaf(&mut writer, &format!("{}:{}", call.prefix, name), value)?;
    }

    let nested = call
        .nested_element
        .map(|nested| format!("{}:{}", call.prefix, nested));
    if let Some(nested) = &nested {
        write_start(&mut writer, nested)?;
    }
    for (name, value) in &call.fields {
        write_leaf(&mut writer, &format!("{}:{}", call.prefix, name), value)?;
    }
    if let Some(nested) = &nested {
        write_end(&mut writer, nested)?;
    }

    write_end(&mut writer, &action)?;
    write_end(&mut writer, "env:Body")?;
    write_end(&mut writer, "env:Envelope")?;

    String::from_utf8(writer.into_inner()).change_context(ConnectorError::RequestEncodingFailed)
}

fn write_start(writer: &mut Writer<Vec<u8>>, name: &str) -> CustomResult<(), ConnectorError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .change_context(ConnectorError::RequestEncodingFailed)
        .attach_printable_lazy(|| format!("failed to open element {name}"))
}

fn write_end(writer: &mut Writer<Vec<u8>>, name: &str) -> CustomResult<(), ConnectorError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .change_context(ConnectorError::RequestEncodingFailed)
        .attach_printable_lazy(|| format!("failed to close element {name}"))
}

fn write_leaf(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> CustomResult<(), ConnectorError> {
    write_start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .change_context(ConnectorError::RequestEncodingFailed)
        .attach_printable_lazy(|| format!("failed to write text of {name}"))?;
    write_end(writer, name)
}

/// Element tree with namespace prefixes stripped from the names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }
}

/// Reads the document element of `body`; `None` for a document without one.
pub fn parse_xml_tree(body: &str) -> CustomResult<Option<XmlNode>, ConnectorError> {
    // Text is kept verbatim; whitespace between elements lands on branch
    // nodes, whose text is never read.
    let mut reader = Reader::from_str(body);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root = None;

    loop {
        let event = reader
            .read_event()
            .change_context(ConnectorError::ResponseDeserializationFailed)
            .attach_printable_lazy(|| {
                format!("malformed XML at byte {}", reader.buffer_position())
            })?;

        match event {
            Event::Start(start) => stack.push(XmlNode::new(local_name(&start)?)),
            Event::Empty(start) => {
                let node = XmlNode::new(local_name(&start)?);
                attach(&mut stack, &mut root, node);
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .change_context(ConnectorError::ResponseDeserializationFailed)?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or(report!(ConnectorError::ResponseDeserializationFailed))
                    .attach_printable("closing tag without a matching opening tag")?;
                attach(&mut stack, &mut root, node);
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(report!(ConnectorError::ResponseDeserializationFailed))
            .attach_printable("document ended with unclosed elements");
    }

    Ok(root)
}

fn local_name(start: &BytesStart<'_>) -> CustomResult<String, ConnectorError> {
    std::str::from_utf8(start.local_name().as_ref())
        .map(str::to_owned)
        .change_context(ConnectorError::ResponseDeserializationFailed)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

/// How the flattening visitor treats an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// No child elements: recorded as a single text value
    Leaf,
    /// The outer web-service status, grouped under `web_service`
    WebServiceStatus,
    /// Repeated transactions, each flattened on its own under `search_results`
    SearchResultList,
    /// Any other element with children: flattened into the enclosing mapping
    Branch,
}

impl NodeKind {
    /// An empty search result still counts as a list; any other element
    /// without children is a leaf.
    pub fn of(node: &XmlNode) -> Self {
        match node.name.as_str() {
            SEARCH_RESULTS_ELEMENT => Self::SearchResultList,
            _ if node.children.is_empty() => Self::Leaf,
            WEB_SERVICE_STATUS_ELEMENT => Self::WebServiceStatus,
            _ => Self::Branch,
        }
    }
}

/// Flattens a node into `response` according to its [`NodeKind`].
pub fn visit_node(node: &XmlNode, response: &mut ParsedResponse) {
    match NodeKind::of(node) {
        NodeKind::Leaf => visit_leaf(node, response),
        NodeKind::WebServiceStatus => visit_web_service_status(node, response),
        NodeKind::SearchResultList => visit_search_results(node, response),
        NodeKind::Branch => node
            .children
            .iter()
            .for_each(|child| visit_node(child, response)),
    }
}

fn visit_leaf(node: &XmlNode, response: &mut ParsedResponse) {
    let key = if node.name == TOKEN_ELEMENT {
        BILLING_ID_KEY.to_string()
    } else {
        to_snake_case(&node.name)
    };
    response.insert_text(key, node.text.clone());
}

fn visit_web_service_status(node: &XmlNode, response: &mut ParsedResponse) {
    let mut status = Map::new();
    for (element, key) in [
        ("ResponseCode", RESPONSE_CODE_KEY),
        ("ResponseMessage", RESPONSE_MESSAGE_KEY),
    ] {
        if let Some(child) = node.child(element) {
            status.insert(key.to_string(), Value::String(child.text.clone()));
        }
    }
    response.insert_web_service(status);
}

fn visit_search_results(node: &XmlNode, response: &mut ParsedResponse) {
    let results = node
        .children
        .iter()
        .map(|txn| {
            let mut result = ParsedResponse::new();
            visit_node(txn, &mut result);
            result
        })
        .collect();
    response.insert_search_results(results);
}

/// Strict parse: malformed XML is an error.
pub fn try_parse_xml_response(body: &str) -> CustomResult<ParsedResponse, ConnectorError> {
    let mut response = ParsedResponse::new();
    if body.trim().is_empty() {
        return Ok(response);
    }

    if let Some(root) = parse_xml_tree(body)? {
        root.children
            .iter()
            .for_each(|child| visit_node(child, &mut response));
    }
    Ok(response)
}

/// Flattens a processor response body.
///
/// Blank or malformed bodies yield an empty mapping, which callers treat as
/// a failed call.
pub fn parse_xml_response(body: &str) -> ParsedResponse {
    try_parse_xml_response(body).unwrap_or_else(|err| {
        tracing::warn!(error = ?err, "Unparsable connector response, treating as empty");
        ParsedResponse::new()
    })
}

/// `PascalCase`/`camelCase` to `snake_case`.
///
/// Runs of capitals stay together (`CRN1` becomes `crn1`) and only split
/// before a capital that starts a lowercase word (`HTTPResponse` becomes
/// `http_response`). Hyphens become underscores.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut snake = String::with_capacity(name.len() + 4);

    for (index, current) in chars.iter().enumerate() {
        let previous = index.checked_sub(1).and_then(|i| chars.get(i));
        let next = chars.get(index + 1);

        if current.is_ascii_uppercase() {
            let after_lower_or_digit =
                previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            let ends_capital_run = previous
                .is_some_and(|p| p.is_ascii_uppercase() || p.is_ascii_digit())
                && next.is_some_and(char::is_ascii_lowercase);
            if after_lower_or_digit || ends_capital_run {
                snake.push('_');
            }
        }

        match current {
            '-' => snake.push('_'),
            c => snake.extend(c.to_lowercase()),
        }
    }

    snake
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMESPACES: [(&str, &str); 2] = [
        ("xmlns:env", "http://schemas.xmlsoap.org/soap/envelope/"),
        ("xmlns:ns0", "urn:Eve"),
    ];

    fn envelope(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body>{inner}</soap:Body></soap:Envelope>"#
        )
    }

    #[test]
    fn snake_case_matches_processor_field_names() {
        assert_eq!(to_snake_case("ResponseCode"), "response_code");
        assert_eq!(to_snake_case("AuthoriseId"), "authorise_id");
        assert_eq!(to_snake_case("CRN1"), "crn1");
        assert_eq!(to_snake_case("CVC"), "cvc");
        assert_eq!(to_snake_case("HTTPResponse"), "http_response");
        assert_eq!(to_snake_case("Crn1Value"), "crn1_value");
        assert_eq!(to_snake_case("merchantNumber"), "merchant_number");
        assert_eq!(to_snake_case("response"), "response");
        assert_eq!(to_snake_case("Txn-Type"), "txn_type");
    }

    #[test]
    fn web_service_status_is_grouped_and_not_leaked() {
        let body = envelope(
            "<ProcessPaymentResponse><response><ResponseCode>SUCCESS</ResponseCode><ResponseMessage>Approved</ResponseMessage></response></ProcessPaymentResponse>",
        );
        let parsed = parse_xml_response(&body);

        let mut expected = Map::new();
        expected.insert(
            "response_code".to_string(),
            Value::String("SUCCESS".to_string()),
        );
        expected.insert(
            "response_message".to_string(),
            Value::String("Approved".to_string()),
        );
        assert_eq!(parsed.web_service(), Some(&expected));
        assert!(!parsed.contains_key("response_code"));
        assert!(!parsed.contains_key("response_message"));
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn web_service_status_does_not_collide_with_payment_code() {
        let body = envelope(
            "<ProcessPaymentResponse><response><ResponseCode>SUCCESS</ResponseCode></response><txnResp><ResponseCode>0</ResponseCode><AuthorisationResult>Approved</AuthorisationResult></txnResp></ProcessPaymentResponse>",
        );
        let parsed = parse_xml_response(&body);

        assert_eq!(parsed.web_service_code(), Some("SUCCESS"));
        assert_eq!(parsed.get_str("response_code"), Some("0"));
        assert_eq!(parsed.get_str("authorisation_result"), Some("Approved"));
    }

    #[test]
    fn search_results_become_ordered_list() {
        let body = envelope(
            "<SearchTransactionsResponse><SearchTransactionsResult><Txn><Amount>100</Amount></Txn><Txn><Amount>200</Amount></Txn></SearchTransactionsResult></SearchTransactionsResponse>",
        );
        let parsed = parse_xml_response(&body);

        let expected = serde_json::json!([{ "amount": "100" }, { "amount": "200" }]);
        assert_eq!(parsed.get("search_results"), Some(&expected));
        assert!(!parsed.contains_key("amount"));
    }

    #[test]
    fn empty_search_result_is_an_empty_list() {
        let body = envelope(
            "<SearchTransactionsResponse><SearchTransactionsResult/></SearchTransactionsResponse>",
        );
        let parsed = parse_xml_response(&body);
        assert_eq!(parsed.get("search_results"), Some(&serde_json::json!([])));
    }

    #[test]
    fn childless_response_element_is_a_leaf() {
        let body = envelope("<DeleteTokenResponse><response/></DeleteTokenResponse>");
        let parsed = parse_xml_response(&body);
        assert_eq!(parsed.get_str("response"), Some(""));
        assert_eq!(parsed.web_service(), None);
        assert_eq!(
            NodeKind::of(&XmlNode::new("response".to_string())),
            NodeKind::Leaf
        );
    }

    #[test]
    fn leaf_text_keeps_surrounding_whitespace() {
        let body = envelope(
            "<R>\n  <Message> Approved </Message>\n  <Code>0</Code>\n</R>",
        );
        let parsed = parse_xml_response(&body);
        assert_eq!(parsed.get_str("message"), Some(" Approved "));
        assert_eq!(parsed.get_str("code"), Some("0"));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn token_is_recorded_as_billing_id_at_any_depth() {
        let body = envelope(
            "<AddTokenResponse><AddTokenResult><tokenResp><Token>ABC123</Token></tokenResp></AddTokenResult></AddTokenResponse>",
        );
        let parsed = parse_xml_response(&body);
        assert_eq!(parsed.billing_id(), Some("ABC123"));
        assert!(!parsed.contains_key("token"));
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let body = envelope("<A><Code>1</Code></A><B><Code>2</Code></B>");
        assert_eq!(parse_xml_response(&body).get_str("code"), Some("2"));
    }

    #[test]
    fn blank_body_yields_empty_mapping() {
        assert!(parse_xml_response("").is_empty());
        assert!(parse_xml_response("   \n").is_empty());
    }

    #[test]
    fn malformed_body_yields_empty_mapping() {
        assert!(parse_xml_response("<a><b></a>").is_empty());
        assert!(parse_xml_response("<a><b>unterminated").is_empty());

        let err = try_parse_xml_response("<a><b></a>").unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConnectorError::ResponseDeserializationFailed
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let body = envelope(
            "<ProcessPaymentResponse><response><ResponseCode>SUCCESS</ResponseCode></response><txnResp><Amount>1000</Amount></txnResp></ProcessPaymentResponse>",
        );
        assert_eq!(parse_xml_response(&body), parse_xml_response(&body));
    }

    #[test]
    fn escaped_and_cdata_text_is_decoded() {
        let body = envelope(
            "<R><Note>A &amp; B</Note><Raw><![CDATA[<kept>]]></Raw><Blank/></R>",
        );
        let parsed = parse_xml_response(&body);
        assert_eq!(parsed.get_str("note"), Some("A & B"));
        assert_eq!(parsed.get_str("raw"), Some("<kept>"));
        assert_eq!(parsed.get_str("blank"), Some(""));
    }

    #[test]
    fn envelope_nests_fields_and_escapes_text() {
        let call = SoapCall {
            prefix: "ns0",
            action: "ProcessPayment",
            header_fields: vec![("username", "user"), ("password", "p<w>&d")],
            nested_element: Some("txnReq"),
            fields: vec![("CRN1", "O'Brien & Sons"), ("Amount", "1000")],
        };
        let xml = build_soap_envelope(&NAMESPACES, &call).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(
            r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns0="urn:Eve">"#
        ));
        assert!(xml.contains("<ns0:password>p&lt;w&gt;&amp;d</ns0:password>"));
        assert!(xml.contains(
            "<ns0:txnReq><ns0:CRN1>O&apos;Brien &amp; Sons</ns0:CRN1><ns0:Amount>1000</ns0:Amount></ns0:txnReq>"
        ));
        assert!(xml.ends_with("</ns0:ProcessPayment></env:Body></env:Envelope>"));
    }

    #[test]
    fn envelope_without_nested_element_writes_fields_under_action() {
        let call = SoapCall {
            prefix: "ns0",
            action: "DeleteToken",
            header_fields: vec![("username", "user")],
            nested_element: None,
            fields: vec![("token", "T1")],
        };
        let xml = build_soap_envelope(&NAMESPACES, &call).unwrap();
        assert!(xml.contains(
            "<ns0:DeleteToken><ns0:username>user</ns0:username><ns0:token>T1</ns0:token></ns0:DeleteToken>"
        ));
    }

    #[test]
    fn built_envelope_parses_back_into_fields() {
        let call = SoapCall {
            prefix: "ns0",
            action: "AddToken",
            header_fields: vec![],
            nested_element: Some("tokenRequest"),
            fields: vec![("ExpiryDate", "9900")],
        };
        let xml = build_soap_envelope(&NAMESPACES, &call).unwrap();
        assert_eq!(parse_xml_response(&xml).get_str("expiry_date"), Some("9900"));
    }
}
