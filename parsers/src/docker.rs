//! `docker images` table parsing.

use std::collections::HashMap;

use cli_output_core::{ParseError, RawOutput, Result};
use serde::{Deserialize, Serialize};

use crate::table::ColumnTableParser;

/// Column vocabulary `docker images` is known to emit. `DIGEST` only
/// appears with `--digests`; absent headers are simply not matched.
const POSSIBLE_HEADERS: &[&str] = &["REPOSITORY", "TAG", "DIGEST", "IMAGE ID", "CREATED", "SIZE"];

/// Table parser configured with the `docker images` column vocabulary.
#[derive(Debug, Clone)]
pub struct DockerImagesParser {
    table: ColumnTableParser,
}

impl DockerImagesParser {
    pub fn new() -> Self {
        Self {
            table: ColumnTableParser::new(POSSIBLE_HEADERS),
        }
    }

    /// Parses the raw table into one field map per image row.
    pub fn get_output_values_list(&self, raw: &RawOutput) -> Result<Vec<HashMap<String, String>>> {
        self.table.parse(raw)
    }
}

impl Default for DockerImagesParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of `docker images`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerImagesObject {
    pub repository: String,
    pub tag: String,
    pub image_id: String,
    pub created: String,
    pub size: String,
}

/// Parsed `docker images` output owning one object per image row.
#[derive(Debug, Clone)]
pub struct DockerImagesOutput {
    images: Vec<DockerImagesObject>,
}

impl DockerImagesOutput {
    /// Parses raw `docker images` output.
    pub fn parse(raw: impl Into<RawOutput>) -> Result<Self> {
        let raw = raw.into();
        let rows = DockerImagesParser::new().get_output_values_list(&raw)?;
        let images = rows
            .into_iter()
            .map(|row| DockerImagesObject {
                repository: row.get("REPOSITORY").cloned().unwrap_or_default(),
                tag: row.get("TAG").cloned().unwrap_or_default(),
                image_id: row.get("IMAGE ID").cloned().unwrap_or_default(),
                created: row.get("CREATED").cloned().unwrap_or_default(),
                size: row.get("SIZE").cloned().unwrap_or_default(),
            })
            .collect();
        Ok(Self { images })
    }

    /// All image rows in source order.
    pub fn get_images(&self) -> &[DockerImagesObject] {
        &self.images
    }

    /// The image with the given repository name.
    ///
    /// Errors when no row or more than one row carries that repository.
    pub fn get_image(&self, repository: &str) -> Result<&DockerImagesObject> {
        let matches: Vec<&DockerImagesObject> = self
            .images
            .iter()
            .filter(|image| image.repository == repository)
            .collect();
        match matches.as_slice() {
            [image] => Ok(image),
            [] => Err(ParseError::NotFound {
                entity: "image".to_string(),
                name: repository.to_string(),
            }),
            _ => Err(ParseError::AmbiguousLookup {
                entity: "image".to_string(),
                name: repository.to_string(),
                count: matches.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGES: &str = "\
REPOSITORY                          TAG         IMAGE ID        CREATED         SIZE
alpine                              latest      1d34ffeaf190    4 weeks ago     7.79MB
busybox                             latest      65ad0d468eb1    13 months ago   4.26MB
registry.local:9001/node-hello      latest      4c7ea8709739    8 years ago     644MB
";

    #[test]
    fn test_rows_become_typed_objects() {
        let output = DockerImagesOutput::parse(IMAGES).unwrap();
        let images = output.get_images();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].repository, "alpine");
        assert_eq!(images[0].size, "7.79MB");
        assert_eq!(images[2].repository, "registry.local:9001/node-hello");
        assert_eq!(images[2].created, "8 years ago");
    }

    #[test]
    fn test_repository_lookup() {
        let output = DockerImagesOutput::parse(IMAGES).unwrap();
        assert_eq!(output.get_image("busybox").unwrap().image_id, "65ad0d468eb1");
        assert!(matches!(
            output.get_image("missing"),
            Err(ParseError::NotFound { .. })
        ));
    }

    #[test]
    fn test_digest_column_is_recognized_when_present() {
        let listing = "\
REPOSITORY   TAG      DIGEST          IMAGE ID       CREATED       SIZE
alpine       latest   sha256:c5b126   1d34ffeaf190   4 weeks ago   7.79MB
";
        let rows = DockerImagesParser::new()
            .get_output_values_list(&listing.into())
            .unwrap();
        assert_eq!(rows[0]["DIGEST"], "sha256:c5b126");
        assert_eq!(rows[0]["IMAGE ID"], "1d34ffeaf190");
    }

    #[test]
    fn test_duplicate_repository_lookup_is_ambiguous() {
        let doubled = format!(
            "{IMAGES}alpine                              3.19        9f8c7a1b2c3d    2 weeks ago     7.41MB\n"
        );
        let output = DockerImagesOutput::parse(doubled.as_str()).unwrap();
        let err = output.get_image("alpine").unwrap_err();
        assert!(matches!(err, ParseError::AmbiguousLookup { count: 2, .. }));
    }
}
