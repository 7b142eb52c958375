//! Documents shown by the viewer.
//!
//! The collection is fixed for the session. Documents are addressed by their
//! position in it, never by reference, so interaction records can carry a
//! plain index across the build/dispatch boundary.

use crate::error::{Result, ViewerError};

/// A titled, immutable body of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub contents: String,
}

impl Document {
    pub fn new(title: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            contents: contents.into(),
        }
    }

    /// Length of the contents in characters, the unit selections are measured in.
    pub fn char_len(&self) -> usize {
        self.contents.chars().count()
    }
}

/// Ordered, non-empty, fixed-length list of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCollection {
    documents: Vec<Document>,
}

impl DocumentCollection {
    /// Create a collection. Fails if `documents` is empty.
    pub fn new(documents: Vec<Document>) -> Result<Self> {
        if documents.is_empty() {
            return Err(ViewerError::EmptyCollection);
        }
        Ok(Self { documents })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.documents.len()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// The five documents of the demo.
    pub fn sample() -> Self {
        Self {
            documents: vec![
                Document::new("Squirrels", SQUIRRELS),
                Document::new("Lorem Ipsum", LOREM_IPSUM),
                Document::new("Vacuum Instructions", VACUUM),
                Document::new("Article 4", "Article 4 Content"),
                Document::new("Article 5", "Article 5 Content"),
            ],
        }
    }
}

const SQUIRRELS: &str = "The Secret Life of Squirrels: Nature's Clever Acrobats\n\
Squirrels are often overlooked creatures, dismissed as mere park inhabitants or backyard \
nuisances. Yet beneath their fluffy tails and twitching noses lies an intricate world of \
cunning, agility, and survival tactics.\n\
\n\
Master Tree Climbers\n\
At the heart of a squirrel's skill set is its ability to navigate trees with ease. Powerful \
hind legs give them remarkable jumping power, and a tail that acts as a counterbalance lets \
them leap many times the length of their body.\n\
\n\
Food Hoarders Extraordinaire\n\
Squirrels scatter their food across many hidden caches and remember thousands of hiding \
spots. Forgotten caches sprout into new trees, which makes squirrels accidental forest \
gardeners.\n";

const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure \
dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.";

const VACUUM: &str = "Chapter 3: Getting Started - Unpacking and Setup\n\
\n\
1. Unboxing Your Vacuum\n\
Carefully remove the vacuum cleaner from the box and place the unit on a flat, stable \
surface.\n\
\n\
2. Assembling Your Vacuum\n\
Attach the extension wand to the main body and twist it into place until you hear a click.\n\
\n\
3. Powering On\n\
Plug the power cord into a grounded outlet and press the switch to the \"On\" position.";
