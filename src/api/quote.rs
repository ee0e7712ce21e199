//! The quote pipeline behind `POST /calculate`.
//!
//! Runs the calculators in order (base rate, client location adjustment,
//! multipliers, revenue, market positioning) and records every decision in
//! an audit trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::calculation::{
    BaseRateBreakdown, adjust_for_location, adjusted_market_range, apply_multipliers,
    calculate_potential_gains, checked_mul, classify_position, competitive_position,
    compute_base_rate, effective_tax_percent, experience_market_rates, location_insights,
    project_revenue, to_reference_currency,
};
use crate::config::{ProfessionProfile, ReferenceDataLoader};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ClientQuote, LocationRecord, MarketComparison,
    QuoteResult,
};

use super::request::{ClientLocationRequest, QuoteRequest};

/// Collects audit steps and warnings with sequential step numbers.
#[derive(Debug, Default)]
struct AuditLog {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl AuditLog {
    fn step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: Value,
        output: Value,
        reasoning: impl Into<String>,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning: reasoning.into(),
        });
    }

    fn warn(&mut self, code: &str, message: impl Into<String>, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message: message.into(),
            severity: severity.to_string(),
        });
    }

    fn finish(self, started: Instant) -> AuditTrace {
        AuditTrace {
            steps: self.steps,
            warnings: self.warnings,
            duration_us: started.elapsed().as_micros() as u64,
        }
    }
}

/// Produces a complete quote for a request.
///
/// Unknown professions or states, invalid margins, schedules and exchange
/// rates are errors, as are figures that overflow the `Decimal` range. A
/// client location that is unknown or lacks developer rate data is not, nor
/// is a zero base rate with a client location: the quote falls back to the
/// unadjusted base rate and records an audit warning.
pub fn perform_quote(
    request: &QuoteRequest,
    reference: &ReferenceDataLoader,
) -> EngineResult<QuoteResult> {
    let started = Instant::now();
    let mut audit = AuditLog::default();
    let settings = reference.settings();

    let profile = reference.profession(&request.profession)?;
    let cost_index = reference.cost_index(&request.state)?;
    let exchange_rate = request
        .exchange_rate
        .unwrap_or(settings.default_exchange_rate);
    if exchange_rate <= Decimal::ZERO {
        return Err(EngineError::InvalidExchangeRate {
            rate: exchange_rate,
        });
    }

    let breakdown = compute_base_rate(&request.expenses, cost_index, &request.schedule)?;
    audit.step(
        "base_rate",
        "Compute base hourly rate",
        json!({
            "expenses": &request.expenses,
            "schedule": &request.schedule,
            "state": &request.state,
            "cost_of_living_index": cost_index,
        }),
        json!(&breakdown),
        format!(
            "Gross monthly needs of {} over {} working hours per month",
            breakdown.gross_monthly_needs.round_dp(2),
            breakdown.working_hours_per_month.round_dp(2)
        ),
    );

    let client = match &request.client_location {
        Some(client_location) => quote_client(
            request,
            client_location,
            reference,
            &breakdown,
            cost_index,
            exchange_rate,
            &mut audit,
        )?,
        None => None,
    };

    let base_rate = client
        .as_ref()
        .map_or(breakdown.base_rate, |c| c.final_base_rate);

    let rates = apply_multipliers(base_rate)?;
    let rates_reference = rates.to_reference(exchange_rate)?;
    audit.step(
        "multipliers",
        "Apply situational multipliers",
        json!({ "base_rate": base_rate }),
        json!(&rates),
        "Regular 1.0x, revision 1.25x, rush 1.5x, difficult client 2.0x",
    );

    let revenue = project_revenue(rates.regular, &request.schedule)?;
    let revenue_reference = revenue.to_reference(exchange_rate)?;
    audit.step(
        "revenue",
        "Project revenue",
        json!({ "rate": rates.regular, "schedule": &request.schedule }),
        json!(&revenue),
        "Daily revenue times working days, 4.33 weeks per month",
    );

    let market = compare_with_market(
        request,
        profile,
        base_rate,
        cost_index,
        exchange_rate,
        client.as_ref().map(|c| &c.location),
        &mut audit,
    )?;

    Ok(QuoteResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        cost_of_living_index: cost_index,
        exchange_rate,
        breakdown,
        base_rate,
        rates,
        rates_reference,
        revenue,
        revenue_reference,
        market,
        client,
        audit_trace: audit.finish(started),
    })
}

fn quote_client(
    request: &QuoteRequest,
    client_location: &ClientLocationRequest,
    reference: &ReferenceDataLoader,
    breakdown: &BaseRateBreakdown,
    cost_index: Decimal,
    exchange_rate: Decimal,
    audit: &mut AuditLog,
) -> EngineResult<Option<ClientQuote>> {
    let location = match reference.find_location(&client_location.city, &client_location.country)
    {
        Ok(location) => location,
        Err(err @ EngineError::LocationNotFound { .. }) => {
            audit.warn(
                "LOCATION_NOT_FOUND",
                format!("{}; quoting the unadjusted base rate", err),
                "medium",
            );
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let home_country = &reference.settings().home_country;
    let original_tax = request.expenses.tax_percent;
    let effective_tax = effective_tax_percent(original_tax, &location.country, home_country);
    audit.step(
        "tax_adjustment",
        "Apply international tax adjustment",
        json!({
            "tax_percent": original_tax,
            "client_country": &location.country,
            "home_country": home_country,
        }),
        json!({ "effective_tax_percent": effective_tax }),
        if effective_tax == original_tax {
            format!("Tax stays at {}% for this client", original_tax)
        } else {
            format!(
                "Exported services taxed at {}% instead of {}%",
                effective_tax, original_tax
            )
        },
    );

    let adjusted_tax = compute_base_rate(
        &request.expenses.with_tax_percent(effective_tax),
        cost_index,
        &request.schedule,
    )?;
    let base_rate_with_adjusted_tax = adjusted_tax.base_rate;
    if base_rate_with_adjusted_tax <= Decimal::ZERO {
        audit.warn(
            "NON_POSITIVE_BASE_RATE",
            format!(
                "A base rate of {} cannot be adjusted for {}; quoting the unadjusted base rate",
                base_rate_with_adjusted_tax.round_dp(2),
                location.city
            ),
            "medium",
        );
        return Ok(None);
    }

    let adjustment = match adjust_for_location(base_rate_with_adjusted_tax, location, exchange_rate)
    {
        Ok(adjustment) => adjustment,
        Err(err @ EngineError::MissingLocationData { .. }) => {
            audit.warn(
                "MISSING_LOCATION_DATA",
                format!("{}; quoting the unadjusted base rate", err),
                "medium",
            );
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let final_base_rate =
        checked_mul(adjustment.adjusted_rate, exchange_rate, "final_base_rate")?;
    audit.step(
        "location_adjustment",
        "Adjust rate for client location",
        json!({
            "base_rate": base_rate_with_adjusted_tax,
            "city": &location.city,
            "country": &location.country,
            "exchange_rate": exchange_rate,
        }),
        json!({
            "adjustment": &adjustment,
            "final_base_rate": final_base_rate,
        }),
        adjustment.reasoning.clone(),
    );

    let potential_gains = calculate_potential_gains(
        breakdown.base_rate,
        final_base_rate,
        breakdown.working_hours_per_month,
        original_tax,
        effective_tax,
    )?;
    audit.step(
        "potential_gains",
        "Compare net revenue with the home rate",
        json!({
            "base_rate": breakdown.base_rate,
            "final_base_rate": final_base_rate,
            "working_hours_per_month": breakdown.working_hours_per_month,
        }),
        json!(&potential_gains),
        format!(
            "Net monthly {} of {}",
            if potential_gains.is_gain { "gain" } else { "loss" },
            potential_gains.monthly_difference.abs().round_dp(2)
        ),
    );

    Ok(Some(ClientQuote {
        location: location.clone(),
        insights: location_insights(location),
        effective_tax_percent: effective_tax,
        base_rate_with_adjusted_tax,
        adjustment,
        final_base_rate,
        potential_gains,
    }))
}

fn compare_with_market(
    request: &QuoteRequest,
    profile: &ProfessionProfile,
    base_rate: Decimal,
    cost_index: Decimal,
    exchange_rate: Decimal,
    client_location: Option<&LocationRecord>,
    audit: &mut AuditLog,
) -> EngineResult<MarketComparison> {
    let level = request.experience_level;

    let range = adjusted_market_range(&profile.market_average, cost_index);
    let position = classify_position(base_rate, range.min, range.max);
    let experience_range = experience_market_rates(profile, level, cost_index);

    let rate_reference = to_reference_currency(base_rate, exchange_rate)?;
    let competitive = match competitive_position(rate_reference, client_location, level) {
        Ok(competitive) => competitive,
        Err(err @ EngineError::MissingLocationData { .. }) => {
            audit.warn(
                "MISSING_LOCATION_DATA",
                format!("{}; comparing against the home market", err),
                "low",
            );
            competitive_position(rate_reference, None, level)?
        }
        Err(err) => return Err(err),
    };

    audit.step(
        "market_position",
        "Position rate in the market",
        json!({
            "profession": &request.profession,
            "experience_level": level,
            "base_rate": base_rate,
            "market_average": &profile.market_average,
        }),
        json!({
            "range": &range,
            "position": position,
            "experience_range": &experience_range,
            "competitive_position": &competitive,
        }),
        format!("{}: {}", position.label(), competitive.reasoning),
    );

    Ok(MarketComparison {
        range,
        position,
        label: position.label().to_string(),
        experience_range,
        competitive_position: competitive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::MarketPosition;
    use crate::models::{ExperienceLevel, ExpenseConfig, ScheduleConfig};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn loader() -> ReferenceDataLoader {
        ReferenceDataLoader::load("./config/reference").unwrap()
    }

    fn create_request(client: Option<(&str, &str)>) -> QuoteRequest {
        QuoteRequest {
            profession: "backend".to_string(),
            experience_level: ExperienceLevel::Senior,
            state: "sp".to_string(),
            expenses: ExpenseConfig {
                monthly_expenses: dec("2000"),
                savings_percent: dec("20"),
                extra_percent: dec("10"),
                tax_percent: dec("15"),
            },
            schedule: ScheduleConfig {
                work_hours_per_day: dec("8"),
                work_days_per_week: dec("5"),
                vacation_days_per_year: dec("30"),
            },
            exchange_rate: Some(dec("5.57")),
            client_location: client.map(|(city, country)| ClientLocationRequest {
                city: city.to_string(),
                country: country.to_string(),
            }),
        }
    }

    #[test]
    fn test_quote_without_client_uses_home_base_rate() {
        let result = perform_quote(&create_request(None), &loader()).unwrap();

        assert_eq!(result.base_rate, result.breakdown.base_rate);
        assert_eq!(result.base_rate.round_dp(2), dec("19.95"));
        assert_eq!(result.rates.regular, result.base_rate);
        assert!(result.client.is_none());
        assert!(result.audit_trace.warnings.is_empty());

        // sp index 100: backend band 50..90; 19.95 < 40
        assert_eq!(result.market.range.min, dec("50"));
        assert_eq!(result.market.position, MarketPosition::BelowMarket);
        assert_eq!(result.market.experience_range.min, dec("30"));
        assert_eq!(result.market.competitive_position.advantage_percent, 0);
    }

    #[test]
    fn test_quote_with_client_uses_final_base_rate() {
        let result = perform_quote(
            &create_request(Some(("san francisco", "United States"))),
            &loader(),
        )
        .unwrap();

        let client = result.client.as_ref().unwrap();
        assert_eq!(client.effective_tax_percent, dec("10.5"));
        assert!(client.base_rate_with_adjusted_tax < result.breakdown.base_rate);
        // competitive floor: 80 * 0.75 = 60 USD
        assert_eq!(client.adjustment.adjusted_rate, dec("60"));
        assert_eq!(client.final_base_rate, dec("334.20"));
        assert_eq!(result.base_rate, client.final_base_rate);
        assert_eq!(result.rates_reference.regular, dec("60"));
        assert!(client.potential_gains.is_gain);
    }

    #[test]
    fn test_audit_steps_are_numbered_in_order() {
        let result = perform_quote(
            &create_request(Some(("Berlin", "Germany"))),
            &loader(),
        )
        .unwrap();

        let ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "base_rate",
                "tax_adjustment",
                "location_adjustment",
                "potential_gains",
                "multipliers",
                "revenue",
                "market_position",
            ]
        );
        for (idx, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, idx as u32 + 1);
        }
    }

    #[test]
    fn test_unknown_location_falls_back_with_warning() {
        let result = perform_quote(
            &create_request(Some(("Atlantis", "Nowhere"))),
            &loader(),
        )
        .unwrap();

        assert!(result.client.is_none());
        assert_eq!(result.base_rate, result.breakdown.base_rate);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "LOCATION_NOT_FOUND");
    }

    #[test]
    fn test_missing_senior_rate_falls_back_with_warning() {
        let result = perform_quote(
            &create_request(Some(("Florianópolis", "Brazil"))),
            &loader(),
        )
        .unwrap();

        assert!(result.client.is_none());
        assert_eq!(result.base_rate, result.breakdown.base_rate);
        assert_eq!(result.audit_trace.warnings[0].code, "MISSING_LOCATION_DATA");
    }

    #[test]
    fn test_domestic_client_keeps_tax() {
        let result = perform_quote(
            &create_request(Some(("São Paulo", "Brazil"))),
            &loader(),
        )
        .unwrap();

        let client = result.client.unwrap();
        assert_eq!(client.effective_tax_percent, dec("15"));
        assert_eq!(client.base_rate_with_adjusted_tax, result.breakdown.base_rate);
        assert_eq!(client.potential_gains.tax_savings, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_profession_and_state_are_errors() {
        let mut request = create_request(None);
        request.profession = "astronaut".to_string();
        assert!(matches!(
            perform_quote(&request, &loader()),
            Err(EngineError::ProfessionNotFound { .. })
        ));

        let mut request = create_request(None);
        request.state = "xx".to_string();
        assert!(matches!(
            perform_quote(&request, &loader()),
            Err(EngineError::StateNotFound { .. })
        ));
    }

    #[test]
    fn test_default_exchange_rate_is_used() {
        let mut request = create_request(None);
        request.exchange_rate = None;

        let result = perform_quote(&request, &loader()).unwrap();
        assert_eq!(result.exchange_rate, dec("5.57"));
    }

    #[test]
    fn test_non_positive_exchange_rate_is_error() {
        let mut request = create_request(None);
        request.exchange_rate = Some(Decimal::ZERO);

        assert!(matches!(
            perform_quote(&request, &loader()),
            Err(EngineError::InvalidExchangeRate { .. })
        ));
    }

    #[test]
    fn test_full_tax_is_error() {
        let mut request = create_request(None);
        request.expenses.tax_percent = dec("100");

        assert!(matches!(
            perform_quote(&request, &loader()),
            Err(EngineError::InvalidTaxRate { .. })
        ));
    }

    #[test]
    fn test_zero_base_rate_with_client_falls_back_with_warning() {
        let mut request = create_request(Some(("San Francisco", "United States")));
        request.expenses.monthly_expenses = Decimal::ZERO;

        let result = perform_quote(&request, &loader()).unwrap();

        assert!(result.client.is_none());
        assert_eq!(result.base_rate, Decimal::ZERO);
        assert_eq!(result.rates.difficult, Decimal::ZERO);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "NON_POSITIVE_BASE_RATE");
        assert!(
            result
                .audit_trace
                .steps
                .iter()
                .all(|s| s.rule_id != "location_adjustment")
        );
    }

    #[test]
    fn test_oversized_expenses_are_invalid_input() {
        let mut request = create_request(Some(("Berlin", "Germany")));
        request.expenses.monthly_expenses = dec("50000000000000000000000000000");

        match perform_quote(&request, &loader()) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "monthly_expenses");
                assert_eq!(message, "value too large");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
