// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-safe names derived from repository URLs

use std::path::PathBuf;

/// Host used for URLs that carry no hostname (e.g. `file:///srv/repo`)
const LOCAL_HOST: &str = "localhost";

/// Return `hostname/path` for a repository URL.
///
/// A trailing `.git` is stripped, userinfo and port are dropped, and the
/// hostname is lower-cased. The path keeps its case.
pub fn repo_slug(url: &str) -> String {
    let url = url.trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);

    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host.split(':').next().unwrap_or_default().to_lowercase();
    let host = if host.is_empty() {
        LOCAL_HOST.to_string()
    } else {
        host
    };

    format!("{}{}", host, path.trim_end_matches('/'))
}

/// Compute the image id for a repository at a resolved ref.
///
/// `prefix + slug + ":" + ref`, with the slug lower-cased and its path
/// separators replaced so the whole id is a valid image reference.
pub fn image_id(prefix: &str, url: &str, resolved_ref: &str) -> String {
    let slug = repo_slug(url).replace('/', "-").to_lowercase();
    format!("{}{}:{}", prefix, slug, path_safe(resolved_ref))
}

/// Relative directory for a repository's run data.
///
/// `github.com/Org/Repo` becomes `github.com/o/org/repo`: the org initial
/// keeps directory fan-out manageable when many repos share a host.
pub fn repo_run_path(url: &str) -> PathBuf {
    let slug = repo_slug(url).to_lowercase();
    let mut parts = slug.split('/').filter(|p| !p.is_empty());

    let mut path = PathBuf::new();
    if let Some(host) = parts.next() {
        path.push(host);
    }
    let rest: Vec<&str> = parts.collect();
    if let Some(initial) = rest.first().and_then(|org| org.chars().next()) {
        path.push(initial.to_string());
    }
    for part in rest {
        path.push(part);
    }
    path
}

/// Make a ref or relative path usable as a single file-name component
pub fn path_safe(s: &str) -> String {
    s.replace(['/', '\\'], "-")
}

#[cfg(test)]
#[path = "slug_tests.rs"]
mod tests;
