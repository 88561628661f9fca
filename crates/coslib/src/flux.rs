//! Butler-Volmer molar flux
//!
//! Evaluates the pore-wall molar flux of one electrode from its loaded
//! parameters and the local state variables:
//!
//! `j = a_s k (ce/ce0)^(1-a) (csmax-cse)^(1-a) cse^a [exp((1-a)F eta/RT) - exp(-a F eta/RT)]`
//!
//! with overpotential `eta = phis - phie - Uocp(cse/csmax)`. Concentration
//! terms go through [`nice_abs`] so states that overshoot physical bounds
//! give zero rather than NaN.

use coslib_expr::CompiledExpression;

use crate::error::{Error, Result};
use crate::params::ParameterMap;

/// Physical constants of the kinetics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxConstants {
    /// Faraday constant, C/mol
    pub faraday: f64,
    /// Gas constant, J/(mol K)
    pub gas_constant: f64,
    /// Temperature, K
    pub temperature: f64,
}

impl Default for FluxConstants {
    fn default() -> Self {
        Self {
            faraday: 96487.0,
            gas_constant: 8.314,
            temperature: 298.15,
        }
    }
}

impl FluxConstants {
    /// `F / (R T)`
    pub fn f_over_rt(&self) -> f64 {
        self.faraday / (self.gas_constant * self.temperature)
    }
}

/// `x` for positive input, zero otherwise (NaN stays NaN)
pub fn nice_abs(x: f64) -> f64 {
    let sign = if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else if x == 0.0 {
        0.0
    } else {
        f64::NAN
    };
    ((sign + 1.0) / 2.0) * x.abs()
}

/// State of every node of one electrode
#[derive(Debug, Clone, Copy)]
pub struct FluxState<'a> {
    /// Electrolyte concentration
    pub ce: &'a [f64],
    /// Solid surface concentration
    pub cse: &'a [f64],
    /// Electrolyte potential
    pub phie: &'a [f64],
    /// Solid potential
    pub phis: &'a [f64],
}

/// Kinetic parameters of one electrode
#[derive(Debug, Clone)]
pub struct FluxModel {
    pub a_s: f64,
    pub k_norm: f64,
    pub alpha: f64,
    pub csmax: f64,
    pub ce0: f64,
    pub uocp: CompiledExpression,
    pub constants: FluxConstants,
}

impl FluxModel {
    /// Pull `a_s`, `k_norm`, `alpha`, `csmax`, `ce0` and `Uocp` from a
    /// loaded parameter group
    pub fn from_parameters(params: &ParameterMap, constants: &FluxConstants) -> Result<Self> {
        Ok(Self {
            a_s: params.scalar("a_s")?,
            k_norm: params.scalar("k_norm")?,
            alpha: params.scalar("alpha")?,
            csmax: params.scalar("csmax")?,
            ce0: params.scalar("ce0")?,
            uocp: params.function("Uocp")?.clone(),
            constants: *constants,
        })
    }

    /// Overpotential at one node
    pub fn overpotential(&self, cse: f64, phie: f64, phis: f64) -> f64 {
        phis - phie - self.uocp.call(cse / self.csmax)
    }

    /// Molar flux at one node
    pub fn molar_flux(&self, ce: f64, cse: f64, phie: f64, phis: f64) -> f64 {
        let alpha = self.alpha;
        let eta = self.overpotential(cse, phie, phis);
        let f_rt = self.constants.f_over_rt();

        let concentration = nice_abs(ce / self.ce0).powf(1.0 - alpha)
            * nice_abs(self.csmax - cse).powf(1.0 - alpha)
            * nice_abs(cse).powf(alpha);
        let kinetics = ((1.0 - alpha) * f_rt * eta).exp() - (-alpha * f_rt * eta).exp();

        self.a_s * self.k_norm * concentration * kinetics
    }

    /// Molar flux at every node
    pub fn evaluate(&self, state: &FluxState<'_>) -> Result<Vec<f64>> {
        let n = state.ce.len();
        for (name, values) in [("cse", state.cse), ("phie", state.phie), ("phis", state.phis)] {
            if values.len() != n {
                return Err(Error::shape(format!("flux state {} vs ce", name), n, values.len()));
            }
        }

        Ok((0..n)
            .map(|i| self.molar_flux(state.ce[i], state.cse[i], state.phie[i], state.phis[i]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterValue;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use coslib_expr::compile;

    fn params() -> ParameterMap {
        let scalar = |name: &str, v: f64| (name.to_string(), ParameterValue::Scalar(v));
        vec![
            scalar("a_s", 1.5e5),
            scalar("k_norm", 2e-11),
            scalar("alpha", 0.5),
            scalar("csmax", 20000.0),
            scalar("ce0", 1000.0),
            (
                "Uocp".to_string(),
                ParameterValue::Functions(compile("@(x) 0.5 - 0.1*x").unwrap()),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn model() -> FluxModel {
        FluxModel::from_parameters(&params(), &FluxConstants::default()).unwrap()
    }

    #[test]
    fn test_nice_abs() {
        assert_eq!(nice_abs(2.5), 2.5);
        assert_eq!(nice_abs(-2.5), 0.0);
        assert_eq!(nice_abs(0.0), 0.0);
        assert!(nice_abs(f64::NAN).is_nan());
    }

    #[test]
    fn test_zero_at_equilibrium() {
        let m = model();
        let phis = 0.5 - 0.1 * 0.5;
        assert_abs_diff_eq!(m.overpotential(10000.0, 0.0, phis), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.molar_flux(1000.0, 10000.0, 0.0, phis), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetric_flux() {
        let m = model();
        let eta = 0.01;
        let phis = 0.45 + eta;
        // alpha = 0.5 reduces to 2 sinh(F eta / 2RT) over sqrt(cse (csmax - cse))
        let f_rt = FluxConstants::default().f_over_rt();
        let expected = 1.5e5 * 2e-11 * 10000.0 * 2.0 * (0.5 * f_rt * eta).sinh();
        assert_relative_eq!(
            m.molar_flux(1000.0, 10000.0, 0.0, phis),
            expected,
            max_relative = 1e-9
        );
        assert!(m.molar_flux(1000.0, 10000.0, 0.0, 0.45 - eta) < 0.0);
    }

    #[test]
    fn test_saturated_surface_gives_zero() {
        let m = model();
        assert_eq!(m.molar_flux(1000.0, 25000.0, 0.0, 1.0), 0.0);
        assert_eq!(m.molar_flux(-5.0, 10000.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_evaluate() {
        let m = model();
        let ce = [1000.0, 1000.0];
        let cse = [10000.0, 10000.0];
        let phie = [0.0, 0.0];
        let phis = [0.45, 0.46];
        let state = FluxState {
            ce: &ce,
            cse: &cse,
            phie: &phie,
            phis: &phis,
        };

        let j = m.evaluate(&state).unwrap();
        assert_eq!(j.len(), 2);
        assert_relative_eq!(j[1], m.molar_flux(1000.0, 10000.0, 0.0, 0.46));

        let short = [0.0];
        let state = FluxState { phie: &short, ..state };
        assert!(matches!(m.evaluate(&state), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_missing_parameter() {
        let partial: ParameterMap = params()
            .iter()
            .filter(|(name, _)| *name != "csmax")
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        let err = FluxModel::from_parameters(&partial, &FluxConstants::default());
        assert!(matches!(err, Err(Error::Lookup(_))));
    }
}
