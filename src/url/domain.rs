use url::Url;

/// Multi-part public suffixes that need three labels for a registrable domain
const MULTI_PART_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au", "co.nz", "co.in",
    "com.br", "com.mx", "co.jp", "com.cn", "com.tr", "co.za", "com.sg", "com.hk", "com.ar",
];

/// Extracts the registrable domain (eTLD+1 approximation) from a host
///
/// Takes the last two labels, or the last three when the host ends in a known
/// multi-part suffix like `co.uk`. IP-literal hosts are returned whole. The
/// host is lowercased first.
///
/// # Examples
///
/// ```
/// use gatescout::url::registrable_domain;
///
/// assert_eq!(registrable_domain("shop.example.com"), "example.com");
/// assert_eq!(registrable_domain("www.example.co.uk"), "example.co.uk");
/// assert_eq!(registrable_domain("example.com"), "example.com");
/// ```
pub fn registrable_domain(host: &str) -> String {
    let host = host.to_lowercase();

    // IP literals have no label structure; the whole address is the domain
    if host.parse::<std::net::IpAddr>().is_ok() {
        return host;
    }

    let labels: Vec<&str> = host.split('.').collect();

    if labels.len() <= 2 {
        return host;
    }

    let last_two = labels[labels.len() - 2..].join(".");
    if MULTI_PART_SUFFIXES.contains(&last_two.as_str()) {
        labels[labels.len() - 3..].join(".")
    } else {
        last_two
    }
}

/// Decides whether a candidate URL is within crawl scope
///
/// A candidate is followed only if its host is the root's registrable domain
/// (or a subdomain of it), or it sits on the payment-processor allow-list so
/// off-site hosted checkout flows are still inspected.
///
/// # Arguments
///
/// * `candidate` - The URL under consideration
/// * `root_domain` - The registrable domain of the scan root
/// * `payment_domains` - Allow-listed processor domains
pub fn in_scope(candidate: &Url, root_domain: &str, payment_domains: &[&str]) -> bool {
    let host = match candidate.host_str() {
        Some(h) => h.to_lowercase(),
        None => return false,
    };

    if host == root_domain {
        return true;
    }

    // Subdomain matching applies to DNS names only; an IP root admits
    // nothing but itself
    if root_domain.parse::<std::net::IpAddr>().is_err()
        && host.ends_with(&format!(".{}", root_domain))
    {
        return true;
    }

    payment_domains
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
}

/// Returns true if the URL path ends in a non-HTML asset extension
///
/// Asset URLs are fetched for classification but never expanded.
pub fn has_asset_extension(url: &Url, extensions: &[&str]) -> bool {
    let path = url.path().to_lowercase();
    extensions.iter().any(|ext| path.ends_with(ext))
}
