use std::collections::HashSet;

use intake_domain::{ScreenDescriptor, ScreenKind};

use crate::error::CatalogError;

/// Ordered, immutable sequence of screens. Construction validates the shape
/// so navigation never has to deal with ambiguous branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    screens: Vec<ScreenDescriptor>,
}

impl Catalog {
    /// Builds a catalog whose last screen carries the preview step.
    pub fn new(screens: Vec<ScreenDescriptor>) -> Result<Self, CatalogError> {
        let catalog = Self::checked(screens)?;
        let flagged = catalog.preview_flags();
        if flagged.len() != 1 {
            return Err(CatalogError::PreviewCount(flagged.len()));
        }
        Ok(catalog)
    }

    /// Builds a catalog without a preview step; the terminal screen completes
    /// on its first advance.
    pub fn linear(screens: Vec<ScreenDescriptor>) -> Result<Self, CatalogError> {
        let catalog = Self::checked(screens)?;
        let flagged = catalog.preview_flags();
        if !flagged.is_empty() {
            return Err(CatalogError::UnexpectedPreview(flagged.len()));
        }
        Ok(catalog)
    }

    fn checked(screens: Vec<ScreenDescriptor>) -> Result<Self, CatalogError> {
        let Some(last) = screens.last() else {
            return Err(CatalogError::Empty);
        };
        if !last.is_terminal() {
            return Err(CatalogError::MissingTerminal(last.id));
        }
        let last_index = screens.len() - 1;

        for (index, screen) in screens.iter().enumerate() {
            if index > 0 {
                let previous = screens[index - 1].id;
                if screen.id <= previous {
                    return Err(CatalogError::IdOrder {
                        previous,
                        next: screen.id,
                    });
                }
            }
            if index != last_index {
                if screen.has_preview() {
                    return Err(CatalogError::PreviewNotLast(screen.id));
                }
                if screen.is_terminal() {
                    return Err(CatalogError::TerminalNotLast(screen.id));
                }
            }
            check_screen(screen)?;
        }

        Ok(Self { screens })
    }

    fn preview_flags(&self) -> Vec<u32> {
        self.screens
            .iter()
            .filter(|screen| screen.has_preview())
            .map(|screen| screen.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// A constructed catalog holds at least one screen, so this is false.
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScreenDescriptor> {
        self.screens.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.screens.len().saturating_sub(1)
    }

    pub fn terminal(&self) -> &ScreenDescriptor {
        &self.screens[self.last_index()]
    }

    pub fn has_preview(&self) -> bool {
        self.terminal().has_preview()
    }

    pub fn screens(&self) -> &[ScreenDescriptor] {
        &self.screens
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScreenDescriptor> {
        self.screens.iter()
    }
}

fn check_screen(screen: &ScreenDescriptor) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidEntry {
        screen: screen.id,
        reason,
    };

    match &screen.kind {
        ScreenKind::Informational | ScreenKind::Terminal { .. } => Ok(()),
        ScreenKind::Form { fields, .. } => {
            if fields.is_empty() {
                return Err(invalid("form has no fields".into()));
            }
            let mut seen = HashSet::new();
            for field in fields {
                if field.name.trim().is_empty() {
                    return Err(invalid("field name is empty".into()));
                }
                if !seen.insert(field.name.as_str()) {
                    return Err(invalid(format!("duplicate field `{}`", field.name)));
                }
            }
            Ok(())
        }
        ScreenKind::SingleChoice { questions } => {
            if questions.is_empty() {
                return Err(CatalogError::NoOptions(screen.id));
            }
            let mut seen = HashSet::new();
            for question in questions {
                if question.options.is_empty() {
                    return Err(invalid(format!(
                        "question `{}` has no options",
                        question.question
                    )));
                }
                if !seen.insert(question.question.as_str()) {
                    return Err(invalid(format!(
                        "duplicate question `{}`",
                        question.question
                    )));
                }
            }
            Ok(())
        }
        ScreenKind::MultiSelect {
            collection,
            options,
            min_selections,
            ..
        } => {
            if options.is_empty() {
                return Err(CatalogError::NoOptions(screen.id));
            }
            if collection.trim().is_empty() {
                return Err(invalid("collection key is empty".into()));
            }
            if *min_selections > options.len() {
                return Err(invalid(format!(
                    "requires {} selections but offers {} options",
                    min_selections,
                    options.len()
                )));
            }
            Ok(())
        }
        ScreenKind::Frequency { options, .. } => {
            if options.is_empty() {
                Err(CatalogError::NoOptions(screen.id))
            } else {
                Ok(())
            }
        }
    }
}
