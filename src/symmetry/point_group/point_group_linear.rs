use crate::symmetry::symmetry_operation::SymmetryOperation;

use super::{
    AnalysisState, PointGroupAnalyzer, LINEAR_CENTROSYMMETRIC_SYMBOL, LINEAR_POLAR_SYMBOL,
};

impl PointGroupAnalyzer {
    /// Handles linear molecules: centrosymmetric ones are D*h, the rest C*v.
    pub(crate) fn analyse_linear(&self, mut state: AnalysisState) -> AnalysisState {
        let inversion = SymmetryOperation::inversion();
        if self.is_valid(&inversion) {
            state.sch_symbol = LINEAR_CENTROSYMMETRIC_SYMBOL.to_owned();
            state.symmops.push(inversion);
        } else {
            state.sch_symbol = LINEAR_POLAR_SYMBOL.to_owned();
        }
        state
    }
}
