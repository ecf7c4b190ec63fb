//! Front-matter parsing for component files.
//!
//! A component file may open with a `---`-delimited YAML block followed by
//! a free-text body. Files without the block parse to empty front matter
//! with the whole text as body.

use crate::error::{Error, Result};
use crate::models::component::Component;
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::Path;

const DELIMITER: &str = "---";

/// Read and parse a component file.
pub fn read_component(path: &Path, folder_name: &str) -> Result<Component> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_component(&content, &path.to_string_lossy(), folder_name)
}

/// Split `content` into front matter and body.
///
/// An empty or null YAML block yields empty front matter; any other
/// non-mapping document is rejected.
pub fn parse_component(content: &str, file_path: &str, folder_name: &str) -> Result<Component> {
    let mut component = Component {
        file_path: file_path.to_string(),
        frontmatter: Map::new(),
        body: content.to_string(),
        folder_name: folder_name.to_string(),
    };
    if !content.starts_with(DELIMITER) {
        return Ok(component);
    }
    let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
    if parts.len() < 3 {
        return Ok(component);
    }

    component.body = parts[2].trim().to_string();
    if parts[1].trim().is_empty() {
        return Ok(component);
    }

    let yaml: Json = serde_yaml::from_str(parts[1]).map_err(|source| Error::Frontmatter {
        path: file_path.to_string(),
        source,
    })?;
    component.frontmatter = match yaml {
        Json::Object(map) => map,
        Json::Null => Map::new(),
        _ => {
            return Err(Error::FrontmatterShape {
                path: file_path.to_string(),
            })
        }
    };
    Ok(component)
}
