//! Host and domain extraction for URI matching.

use std::collections::HashSet;

/// Common two-level public TLDs for registrable domain extraction.
static TWO_LEVEL_TLDS: &[&str] = &[
    // Australia
    "com.au", "net.au", "org.au", "edu.au", "gov.au", "asn.au", "id.au",
    // United Kingdom
    "co.uk", "org.uk", "net.uk", "ac.uk", "gov.uk", "plc.uk", "ltd.uk", "me.uk",
    // Canada
    "co.ca", "net.ca", "org.ca", "gc.ca", "ab.ca", "bc.ca", "mb.ca", "nb.ca", "nf.ca", "nl.ca",
    "ns.ca", "nt.ca", "nu.ca", "on.ca", "pe.ca", "qc.ca", "sk.ca", "yk.ca",
    // India
    "co.in", "net.in", "org.in", "edu.in", "gov.in", "ac.in", "res.in", "gen.in", "firm.in",
    "ind.in",
    // Japan
    "co.jp", "ne.jp", "or.jp", "ac.jp", "ad.jp", "ed.jp", "go.jp", "gr.jp", "lg.jp",
    // South Africa
    "co.za", "net.za", "org.za", "edu.za", "gov.za", "ac.za", "web.za",
    // New Zealand
    "co.nz", "net.nz", "org.nz", "edu.nz", "govt.nz", "ac.nz", "geek.nz", "gen.nz", "kiwi.nz",
    "maori.nz", "mil.nz", "school.nz",
    // Brazil
    "com.br", "net.br", "org.br", "edu.br", "gov.br", "mil.br", "art.br", "adv.br", "eng.br",
    "med.br", "mus.br", "pro.br", "psi.br", "rec.br", "srv.br", "tur.br", "tv.br", "vet.br",
    // Russia
    "com.ru", "net.ru", "org.ru", "edu.ru", "gov.ru", "int.ru", "mil.ru", "spb.ru", "msk.ru",
    // China
    "com.cn", "net.cn", "org.cn", "edu.cn", "gov.cn", "mil.cn", "ac.cn", "bj.cn", "sh.cn",
    "gd.cn", "js.cn", "zj.cn", "hk.cn", "tw.cn",
    // Latin America
    "com.mx", "net.mx", "org.mx", "edu.mx", "gob.mx",
    "com.ar", "net.ar", "org.ar", "edu.ar", "gov.ar", "mil.ar", "int.ar",
    "com.cl", "net.cl", "org.cl", "edu.cl", "gov.cl", "mil.cl",
    "com.co", "net.co", "org.co", "edu.co", "gov.co", "mil.co", "nom.co",
    "com.ve", "net.ve", "org.ve", "edu.ve", "gov.ve", "mil.ve", "web.ve",
    "com.pe", "net.pe", "org.pe", "edu.pe", "gob.pe", "mil.pe", "nom.pe",
    "com.ec", "net.ec", "org.ec", "edu.ec", "gov.ec", "mil.ec", "fin.ec", "pro.ec",
    // Europe
    "co.at", "or.at", "ac.at", "gv.at", "priv.at",
    "co.be", "ac.be",
    "co.dk", "ac.dk",
    "co.il", "net.il", "org.il", "ac.il", "gov.il", "idf.il", "k12.il", "muni.il",
    "co.no", "ac.no", "priv.no",
    "co.pl", "net.pl", "org.pl", "edu.pl", "gov.pl", "mil.pl", "nom.pl", "com.pl",
    // Asia
    "co.th", "net.th", "org.th", "edu.th", "gov.th", "mil.th", "ac.th", "in.th",
    "co.kr", "net.kr", "org.kr", "edu.kr", "gov.kr", "mil.kr", "ac.kr", "go.kr", "ne.kr",
    "or.kr", "pe.kr", "re.kr", "seoul.kr",
    "co.id", "net.id", "org.id", "edu.id", "gov.id", "mil.id", "web.id", "ac.id", "sch.id",
    // Africa
    "co.ma", "net.ma", "org.ma", "edu.ma", "gov.ma", "ac.ma", "press.ma",
    "co.ke", "net.ke", "org.ke", "edu.ke", "gov.ke", "ac.ke", "go.ke", "info.ke", "me.ke",
    "co.ug", "net.ug", "org.ug", "edu.ug", "gov.ug", "ac.ug", "sc.ug", "go.ug", "ne.ug",
    "co.tz", "net.tz", "org.tz", "edu.tz", "gov.tz", "ac.tz", "go.tz", "ne.tz", "or.tz",
];

/// Extracts the normalized `host[:port]` from a URL or bare domain string.
/// Returns an empty string when the input has no valid host.
pub fn extract_host(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let mut host = url.to_lowercase();
    if let Some(stripped) = host.strip_prefix("https://") {
        host = stripped.to_string();
    } else if let Some(stripped) = host.strip_prefix("http://") {
        host = stripped.to_string();
    }

    // Drop userinfo, path, query, and fragment.
    if let Some(pos) = host.find('@') {
        host = host[pos + 1..].to_string();
    }
    for sep in ['/', '?', '#'] {
        if let Some(pos) = host.find(sep) {
            host = host[..pos].to_string();
        }
    }

    if !host.contains('.') {
        return String::new();
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == ':')
    {
        return String::new();
    }
    if host.starts_with('.') || host.ends_with('.') || host.contains("..") {
        return String::new();
    }

    host
}

/// Extracts the hostname (no port) from a URL or bare domain string.
pub fn extract_hostname(url: &str) -> String {
    let host = extract_host(url);
    match host.find(':') {
        Some(pos) => host[..pos].to_string(),
        None => host,
    }
}

/// Reduces a hostname to its registrable domain.
/// "sub.example.com" -> "example.com", "sub.example.co.uk" -> "example.co.uk".
pub fn registrable_domain(hostname: &str) -> String {
    let parts: Vec<&str> = hostname.split('.').collect();
    if parts.len() < 2 {
        return hostname.to_string();
    }

    if parts.len() >= 3 {
        let two_level_set: HashSet<&str> = TWO_LEVEL_TLDS.iter().copied().collect();
        let last_two = format!("{}.{}", parts[parts.len() - 2], parts[parts.len() - 1]);
        if two_level_set.contains(last_two.as_str()) {
            return parts[parts.len() - 3..].join(".");
        }
    }

    parts[parts.len() - 2..].join(".")
}

/// Registrable domain straight from a URL; empty when the URL has no host.
pub fn extract_domain(url: &str) -> String {
    let hostname = extract_hostname(url);
    if hostname.is_empty() {
        return String::new();
    }
    registrable_domain(&hostname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_extraction_keeps_port_and_drops_decoration() {
        assert_eq!(extract_host("https://www.example.com/path"), "www.example.com");
        assert_eq!(extract_host("https://example.com:8443/login?next=/"), "example.com:8443");
        assert_eq!(extract_host("http://user@example.com#frag"), "example.com");
        assert_eq!(extract_host("example.com"), "example.com");
        assert_eq!(extract_host("nodot"), "");
        assert_eq!(extract_host(""), "");
    }

    #[test]
    fn hostname_strips_port() {
        assert_eq!(extract_hostname("https://example.com:8443/x"), "example.com");
    }

    #[test]
    fn registrable_domain_handles_two_level_tlds() {
        assert_eq!(registrable_domain("sub.example.com"), "example.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
        assert_eq!(registrable_domain("sub.example.co.uk"), "example.co.uk");
        assert_eq!(registrable_domain("example.com.au"), "example.com.au");
    }

    #[test]
    fn domain_from_url() {
        assert_eq!(extract_domain("https://accounts.example.co.uk/signin"), "example.co.uk");
        assert_eq!(extract_domain("not a url"), "");
    }
}
