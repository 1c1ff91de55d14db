/// A specific contributing factor within a category, with optional
/// finer-grained sub-causes annotated beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cause {
    pub name: String,
    pub sub_causes: Vec<String>,
}

impl Cause {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_causes: Vec::new(),
        }
    }
}

/// A secondary grouping within a classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub causes: Vec<Cause>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            causes: Vec::new(),
        }
    }
}

/// A top-level grouping hanging off the spine ("Machine", "Method", ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub name: String,
    pub categories: Vec<Category>,
}

impl Classification {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    /// Total number of cause and sub-cause entries in this subtree. Drives
    /// canvas sizing: the densest branch determines the vertical extent.
    pub fn branch_load(&self) -> usize {
        self.categories
            .iter()
            .map(|category| {
                category.causes.len()
                    + category
                        .causes
                        .iter()
                        .map(|cause| cause.sub_causes.len())
                        .sum::<usize>()
            })
            .sum()
    }
}

/// The 4-level diagram tree: classification -> category -> cause -> sub-cause.
///
/// All levels are ordered `Vec`s; insertion order determines left/right and
/// top/bottom placement, so it is preserved end-to-end. The depth is fixed by
/// the types themselves, which makes a malformed tree unrepresentable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FishboneTree {
    pub classifications: Vec<Classification>,
}

impl FishboneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.classifications.is_empty()
    }

    /// Maximum branch load over all classifications (0 for an empty tree).
    pub fn max_branch_load(&self) -> usize {
        self.classifications
            .iter()
            .map(Classification::branch_load)
            .max()
            .unwrap_or(0)
    }

    /// Returns the classification with the given name, appending a new empty
    /// one if it is not present yet. Lookup is linear; trees are small.
    pub fn ensure_classification(&mut self, name: &str) -> &mut Classification {
        if let Some(idx) = self.classifications.iter().position(|c| c.name == name) {
            return &mut self.classifications[idx];
        }
        self.classifications.push(Classification::new(name));
        self.classifications.last_mut().unwrap()
    }

    /// Inserts one row of the tabular source, creating intermediate nodes as
    /// needed. Duplicate (classification, category, cause) paths merge; a
    /// repeated identical path only accumulates sub-causes.
    pub fn insert_row(
        &mut self,
        classification: &str,
        category: &str,
        cause: &str,
        sub_cause: Option<&str>,
    ) {
        let class = self.ensure_classification(classification);
        let cat = if let Some(idx) = class.categories.iter().position(|c| c.name == category) {
            &mut class.categories[idx]
        } else {
            class.categories.push(Category::new(category));
            class.categories.last_mut().unwrap()
        };
        let cause_node = if let Some(idx) = cat.causes.iter().position(|c| c.name == cause) {
            &mut cat.causes[idx]
        } else {
            cat.causes.push(Cause::new(cause));
            cat.causes.last_mut().unwrap()
        };
        if let Some(sub) = sub_cause {
            cause_node.sub_causes.push(sub.to_string());
        }
    }
}
