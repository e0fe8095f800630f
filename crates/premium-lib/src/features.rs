//! Interaction feature construction
//!
//! Derives elementwise products between the income column and the other
//! features. The scalar interaction `income_x_age` comes first, then one
//! `<column>_x_income` column per member of each tracked one-hot group, in
//! group order and then in the order the members appear in the input.

use crate::error::{FrameError, Result};
use crate::table::Table;
use std::collections::HashSet;
use tracing::debug;

/// Anchor column every interaction is multiplied with
pub const INCOME_COLUMN: &str = "income_lakhs";

/// Partner column of the scalar interaction
pub const AGE_COLUMN: &str = "age";

/// Name of the income × age column
pub const INCOME_X_AGE: &str = "income_x_age";

/// Suffix appended to one-hot columns multiplied with income
pub const INTERACTION_SUFFIX: &str = "_x_income";

/// One-hot groups crossed with income, in output order
pub const ONE_HOT_PREFIXES: [&str; 3] = ["medical_history_", "insurance_plan_", "income_level_"];

/// Builds interaction features from a table
///
/// Group membership is decided by name prefix alone. A numeric column such
/// as `medical_history_score` is crossed with income like any one-hot
/// indicator of that group.
#[derive(Debug, Clone)]
pub struct InteractionFeatureBuilder {
    anchor: String,
    partner: String,
    scalar_name: String,
    prefixes: Vec<String>,
    suffix: String,
}

impl Default for InteractionFeatureBuilder {
    fn default() -> Self {
        Self {
            anchor: INCOME_COLUMN.to_string(),
            partner: AGE_COLUMN.to_string(),
            scalar_name: INCOME_X_AGE.to_string(),
            prefixes: ONE_HOT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            suffix: INTERACTION_SUFFIX.to_string(),
        }
    }
}

impl InteractionFeatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked one-hot prefixes, keeping their order
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Names of the columns `build` would append, in output order
    ///
    /// Runs the same checks as `build` and fails exactly when it does.
    pub fn derived_columns(&self, table: &Table) -> Result<Vec<String>> {
        Ok(self
            .plan(table)?
            .into_iter()
            .map(|interaction| interaction.name)
            .collect())
    }

    /// Return a copy of `table` with the interaction columns appended
    ///
    /// Fails with `MissingColumn` when the income or age column is absent,
    /// `TypeMismatch` when any multiplied column holds text, and
    /// `DuplicateColumn` when a derived name is already taken. The input is
    /// never modified.
    pub fn build(&self, table: &Table) -> Result<Table> {
        let plan = self.plan(table)?;

        let mut output = table.clone();
        for interaction in plan {
            let values = product(interaction.factor, interaction.anchor);
            output.push_column(interaction.name, values)?;
        }

        debug!(
            rows = output.n_rows(),
            input_columns = table.n_cols(),
            derived_columns = output.n_cols() - table.n_cols(),
            "Built interaction features"
        );
        Ok(output)
    }

    /// Validate `table` and list every product to append, in output order
    fn plan<'a>(&self, table: &'a Table) -> Result<Vec<Interaction<'a>>> {
        let anchor = table.numeric(&self.anchor)?;
        let partner = table.numeric(&self.partner)?;

        let mut plan = vec![Interaction {
            name: self.scalar_name.clone(),
            factor: partner,
            anchor,
        }];
        for prefix in &self.prefixes {
            // Scan the input, not the output: derived names never open a later group.
            for column in table.columns_with_prefix(prefix) {
                plan.push(Interaction {
                    name: self.derived_name(column),
                    factor: table.numeric(column)?,
                    anchor,
                });
            }
        }

        let mut seen = HashSet::new();
        for interaction in &plan {
            if table.contains(&interaction.name) || !seen.insert(interaction.name.as_str()) {
                return Err(FrameError::DuplicateColumn {
                    column: interaction.name.clone(),
                });
            }
        }
        Ok(plan)
    }

    fn derived_name(&self, column: &str) -> String {
        format!("{}{}", column, self.suffix)
    }
}

/// Add the default interaction features to `table`
pub fn build_interaction_features(table: &Table) -> Result<Table> {
    InteractionFeatureBuilder::default().build(table)
}

/// One derived column: `factor[i] * anchor[i]`
struct Interaction<'a> {
    name: String,
    factor: &'a [f64],
    anchor: &'a [f64],
}

fn product(left: &[f64], right: &[f64]) -> Vec<f64> {
    left.iter().zip(right).map(|(a, b)| a * b).collect()
}
