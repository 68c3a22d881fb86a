//! The compiled template set.

use std::collections::HashMap;

use super::functions::FunctionSet;
use super::sources::{TemplateFile, TemplateSources};
use super::variant::{Root, TemplateVariant};
use crate::error::LoadError;

/// All compiled templates, keyed by file name.
///
/// Built once by [`TemplateRepository::parse`] and never modified
/// afterwards. Every view is compiled with the common partials in front of
/// it; standalone templates are compiled alone.
#[derive(Debug, Clone, Default)]
pub struct TemplateRepository {
    templates: HashMap<String, TemplateVariant>,
}

impl TemplateRepository {
    /// Compiles every view and standalone template in `sources`.
    ///
    /// Fails on the first template that does not compile, and when two
    /// templates share a name.
    pub fn parse(sources: &TemplateSources, functions: &FunctionSet) -> Result<Self, LoadError> {
        let prelude = sources.prelude();
        let mut repository = Self::default();

        for file in &sources.views {
            let source = format!("{prelude}{}", file.content);
            repository.compile(file, source, Root::Main, functions)?;
        }

        for file in &sources.standalone {
            repository.compile(file, file.content.clone(), Root::Standalone, functions)?;
        }

        Ok(repository)
    }

    fn compile(
        &mut self,
        file: &TemplateFile,
        source: String,
        root: Root,
        functions: &FunctionSet,
    ) -> Result<(), LoadError> {
        if self.templates.contains_key(&file.name) {
            return Err(LoadError::DuplicateTemplate {
                name: file.name.clone(),
            });
        }

        tracing::debug!(template_name = %file.name, "Parsing template");

        let variant =
            TemplateVariant::compile(&file.name, source, root, functions).map_err(|source| {
                LoadError::Syntax {
                    name: file.name.clone(),
                    source,
                }
            })?;
        self.templates.insert(file.name.clone(), variant);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TemplateVariant> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Template names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
