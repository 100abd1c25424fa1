use std::fmt;

use prism_core::{PrismError, Result};

use super::RenderStage;
use crate::context::RenderContext;
use crate::queue::RenderQueue;

/// Ordered, name-unique list of render stages.
#[derive(Default)]
pub struct RenderStageCollection {
    stages: Vec<Box<dyn RenderStage>>,
}

impl RenderStageCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage; fails if the name is taken.
    pub fn add(&mut self, stage: impl RenderStage + 'static) -> Result<()> {
        self.add_boxed(Box::new(stage))
    }

    pub fn add_boxed(&mut self, stage: Box<dyn RenderStage>) -> Result<()> {
        let index = self.stages.len();
        self.insert_boxed(index, stage)
    }

    /// Inserts a stage at `index`, shifting later stages back.
    pub fn insert(&mut self, index: usize, stage: impl RenderStage + 'static) -> Result<()> {
        self.insert_boxed(index, Box::new(stage))
    }

    pub fn insert_boxed(&mut self, index: usize, stage: Box<dyn RenderStage>) -> Result<()> {
        if index > self.stages.len() {
            return Err(PrismError::InvalidArgument(format!(
                "stage index {index} out of range for {} stages",
                self.stages.len()
            )));
        }
        if self.contains(stage.name()) {
            return Err(PrismError::DuplicateStage(stage.name().to_string()));
        }

        log::debug!("Render stage '{}' registered at {index}", stage.name());
        self.stages.insert(index, stage);
        Ok(())
    }

    /// Removes the stage called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn RenderStage>> {
        let index = self.position(name)?;
        log::debug!("Render stage '{name}' removed");
        Some(self.stages.remove(index))
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.name() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn RenderStage> {
        self.stages.iter().find(|s| s.name() == name).map(|s| &**s)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn RenderStage + 'static)> {
        self.stages.iter_mut().find(|s| s.name() == name).map(|s| &mut **s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn RenderStage> + '_ {
        self.stages.iter().map(|s| &**s)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn RenderStage + 'static)> + '_ {
        self.stages.iter_mut().map(|s| &mut **s)
    }

    pub fn clear(&mut self) {
        self.stages.clear();
    }

    /// Runs every stage in order.
    pub fn execute_all(&mut self, ctx: &mut dyn RenderContext, queue: &RenderQueue) {
        for stage in &mut self.stages {
            stage.execute(ctx, queue);
        }
    }
}

impl fmt::Debug for RenderStageCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
