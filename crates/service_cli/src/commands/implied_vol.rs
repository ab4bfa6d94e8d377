//! Implied-volatility command implementation
//!
//! Inverts Black-Scholes for one quoted premium.

use pricer_core::math::solvers::NewtonOutcome;
use pricer_core::types::OptionSide;
use pricer_models::ImpliedVolSolver;
use tracing::info;

use crate::Result;

/// One quoted option.
#[derive(Debug, Clone)]
pub struct QuoteArgs {
    /// Spot of the underlying.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Years to expiry.
    pub expiry: f64,
    /// Risk-free rate (decimal).
    pub rate: f64,
    /// Quoted premium.
    pub price: f64,
    /// `call` or `put`.
    pub side: String,
}

/// Run the implied-vol command
///
/// Returns `None` when the inputs leave the volatility undefined.
pub fn run(args: &QuoteArgs) -> Result<Option<NewtonOutcome<f64>>> {
    let side: OptionSide = args.side.parse()?;
    let solver = ImpliedVolSolver::with_defaults();
    info!(
        spot = args.spot,
        strike = args.strike,
        expiry = args.expiry,
        rate = args.rate,
        price = args.price,
        %side,
        "solving implied volatility"
    );

    let outcome = solver.solve_detailed(args.spot, args.strike, args.rate, args.expiry, args.price, side);
    match &outcome {
        Some(o) => {
            println!("implied_vol  {:.6}", o.x);
            println!("iterations   {}", o.iterations);
            println!("exit         {:?}", o.exit);
        }
        None => println!("implied_vol  (undefined)"),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::BlackScholes;

    #[test]
    fn test_recovers_forward_atm_vol() {
        let (spot, rate, expiry) = (50.0_f64, 0.02_f64, 1.0_f64);
        let strike = spot * (rate * expiry).exp();
        let price = BlackScholes::floored(spot, rate, 0.35).price_put(strike, expiry).unwrap();

        let args = QuoteArgs {
            spot,
            strike,
            expiry,
            rate,
            price,
            side: "put".to_string(),
        };
        let outcome = run(&args).unwrap().unwrap();
        assert_relative_eq!(outcome.x, 0.35, epsilon = 1e-4);
        assert!(outcome.converged());
    }

    #[test]
    fn test_undefined_and_invalid_side() {
        let mut args = QuoteArgs {
            spot: 50.0,
            strike: 50.0,
            expiry: 1.0,
            rate: 0.0,
            price: 0.0,
            side: "c".to_string(),
        };
        assert!(run(&args).unwrap().is_none());

        args.side = "straddle".to_string();
        assert!(run(&args).is_err());
    }
}
