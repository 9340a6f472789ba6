/// Replaced with the target host when a payload is rendered.
pub const HOST_PLACEHOLDER: &str = "{host}";

const HTTP_GET: &str = "GET / HTTP/1.1\r\nHost: {host}\r\n\r\n";

/// Send-first payloads. An empty payload means the server speaks first.
const PROTOCOL_PAYLOADS: &[(&str, &str)] = &[
    ("http", HTTP_GET),
    ("https", HTTP_GET),
    ("smtp", "EHLO {host}\r\n"),
    ("ftp", "USER anonymous\r\n"),
    ("ssh", ""),
    ("telnet", ""),
];

/// Protocols that are always spoken over TLS.
const TLS_PROTOCOLS: &[&str] = &["https"];

/// Default payload template for `protocol`. Unknown protocols send nothing.
pub fn default_payload(protocol: &str) -> &'static str {
    PROTOCOL_PAYLOADS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(protocol))
        .map(|(_, payload)| *payload)
        .unwrap_or_default()
}

pub fn implies_tls(protocol: &str) -> bool {
    TLS_PROTOCOLS.iter().any(|name| name.eq_ignore_ascii_case(protocol))
}

pub fn is_known(protocol: &str) -> bool {
    PROTOCOL_PAYLOADS
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(protocol))
}

/// Substitutes `host` into every placeholder of `template`.
pub fn render_payload(template: &str, host: &str) -> String {
    template.replace(HOST_PLACEHOLDER, host)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
