use super::validate_ipv4_address::validate_ipv4_address;

/// Determines if `address` is an RFC 3986 `IPv6address` (without the
/// surrounding brackets): eight groups of one to four hex digits separated by
/// `:`, where one run of groups may be elided by `::` and the last two groups
/// may be written as an IPv4 address.
pub(crate) fn validate_ipv6_address(address: &str) -> bool {
    match split_double_colon(address) {
        Some((head, Some(tail))) => {
            if tail.contains("::") {
                return false;
            }
            let head_groups = match count_groups(head, false) {
                Some(groups) => groups,
                None => return false,
            };
            let tail_groups = match count_groups(tail, true) {
                Some(groups) => groups,
                None => return false,
            };
            head_groups + tail_groups <= 7
        }
        Some((full, None)) => count_groups(full, true) == Some(8),
        None => false,
    }
}

/// Split at the first `::`.  Returns `None` for a lone leading or trailing
/// `:` since those can't begin or end an address.
fn split_double_colon(address: &str) -> Option<(&str, Option<&str>)> {
    match address.find("::") {
        Some(i) => Some((&address[..i], Some(&address[i + 2..]))),
        None if address.starts_with(':') || address.ends_with(':') => None,
        None => Some((address, None)),
    }
}

/// Count the 16-bit groups of a `:`-separated run.  An empty run has no
/// groups; an IPv4 tail counts as two.
fn count_groups(run: &str, allow_ipv4_tail: bool) -> Option<usize> {
    if run.is_empty() {
        return Some(0);
    }
    let groups: Vec<&str> = run.split(':').collect();
    let last = groups.len() - 1;
    let mut count = 0;
    for (i, group) in groups.iter().enumerate() {
        if is_h16(group) {
            count += 1;
        } else if i == last && allow_ipv4_tail && validate_ipv4_address(group) {
            count += 2;
        } else {
            return None;
        }
    }
    Some(count)
}

fn is_h16(group: &str) -> bool {
    (1..=4).contains(&group.len()) && group.bytes().all(|b| b.is_ascii_hexdigit())
}
