//! Text and JSON renderings of samples and CPDs of a `DirectedModel`.

use crate::error::{NetError, Result};
use crate::factor::Factor;
use crate::model::directed::DirectedModel;
use crate::variable::{all_assignments, Assignment};

use serde_json::{Map, Value};

/// The states of every `Variable` of the model, in topological order
fn named_states(model: &DirectedModel, assignment: &Assignment) -> Result<Vec<(String, usize)>> {
    model.topological_order().iter().map(|v| {
        let &state = assignment.get(v).ok_or(NetError::IncompleteAssignment)?;
        Ok((model.name_of(v), state))
    }).collect()
}


/// Render a full assignment as a single line, e.g.
/// ```debtsToIncomeRatio=1 reliability=0 creditWorthiness=1```
pub fn text_line(model: &DirectedModel, assignment: &Assignment) -> Result<String> {
    let parts: Vec<String> = named_states(model, assignment)?
        .into_iter()
        .map(|(name, state)| format!("{}={}", name, state))
        .collect();

    Ok(parts.join(" "))
}


/// Render a full assignment as a single line JSON object keyed by variable name. Keys appear in
/// topological order.
pub fn json_line(model: &DirectedModel, assignment: &Assignment) -> Result<String> {
    let mut map = Map::new();
    for (name, state) in named_states(model, assignment)? {
        map.insert(name, Value::from(state as u64));
    }

    serde_json::to_string(&Value::Object(map)).map_err(|e| NetError::General(e.to_string()))
}


/// Render a CPD as a table with one column per combination of evidence states, e.g.
///
/// ```text
/// P(creditWorthiness | debtsToIncomeRatio, reliability)
/// debtsToIncomeRatio       0       0       1       1
/// reliability              0       1       0       1
/// creditWorthiness(0) 0.2000  0.3000  0.4000  0.5000
/// creditWorthiness(1) 0.8000  0.7000  0.6000  0.5000
/// ```
pub fn cpd_table(model: &DirectedModel, cpd: &Factor) -> Result<String> {
    let var = model.name_of(&cpd.variable());
    let evidence: Vec<String> = cpd.evidence().iter().map(|v| model.name_of(v)).collect();
    let values = cpd.values();

    let mut header = format!("P({}", var);
    if ! evidence.is_empty() {
        header.push_str(" | ");
        header.push_str(&evidence.join(", "));
    }
    header.push(')');

    let mut labels: Vec<String> = evidence.clone();
    labels.extend((0..values.nrows()).map(|s| format!("{}({})", var, s)));
    let width = labels.iter().map(|l| l.len()).max().unwrap_or(0);

    let mut lines = vec![header];

    // one row per evidence variable, listing its state in each column
    let columns: Vec<Assignment> = all_assignments(cpd.evidence()).collect();
    for (label, v) in evidence.iter().zip(cpd.evidence()) {
        let cells: Vec<String> = columns.iter()
                                        .map(|a| format!("{:>7}", a.get(v).cloned().unwrap_or(0)))
                                        .collect();
        lines.push(format!("{:<w$} {}", label, cells.join(" "), w = width));
    }

    for (s, row) in values.rows().into_iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|p| format!("{:>7.4}", p)).collect();
        lines.push(format!("{:<w$} {}", labels[evidence.len() + s], cells.join(" "), w = width));
    }

    Ok(lines.join("\n"))
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::credit::{self, CREDIT_WORTHINESS, RELIABILITY};
    use crate::model::Model;

    fn sample(net: &credit::CreditNetwork) -> Assignment {
        let mut a = Assignment::new();
        a.set(&net.debts_to_income_ratio, 1);
        a.set(&net.reliability, 0);
        a.set(&net.credit_worthiness, 1);
        a
    }

    #[test]
    fn text() {
        let net = credit::network().unwrap();
        assert_eq!(
            "debtsToIncomeRatio=1 reliability=0 creditWorthiness=1",
            text_line(&net.model, &sample(&net)).unwrap()
        );
    }

    #[test]
    fn json() {
        let net = credit::network().unwrap();
        assert_eq!(
            r#"{"debtsToIncomeRatio":1,"reliability":0,"creditWorthiness":1}"#,
            json_line(&net.model, &sample(&net)).unwrap()
        );
    }

    #[test]
    fn incomplete() {
        let net = credit::network().unwrap();
        let mut a = Assignment::new();
        a.set(&net.reliability, 1);

        assert_eq!(Err(NetError::IncompleteAssignment), text_line(&net.model, &a));
    }

    #[test]
    fn tables() {
        let net = credit::network().unwrap();

        let prior = cpd_table(&net.model, net.model.cpd_by_name(RELIABILITY).unwrap()).unwrap();
        let lines: Vec<&str> = prior.lines().collect();
        assert_eq!(vec!["P(reliability)", "reliability(0)  0.6664", "reliability(1)  0.3336"], lines);

        let cw = net.model.lookup_variable(CREDIT_WORTHINESS).unwrap();
        let table = cpd_table(&net.model, net.model.cpd(cw).unwrap()).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(5, lines.len());
        assert_eq!("P(creditWorthiness | debtsToIncomeRatio, reliability)", lines[0]);
        assert!(lines[1].starts_with("debtsToIncomeRatio "));
        assert!(lines[1].ends_with("0       0       1       1"));
        assert!(lines[2].ends_with("0       1       0       1"));
        assert!(lines[3].ends_with("0.2000  0.3000  0.4000  0.5000"));
        assert!(lines[4].starts_with("creditWorthiness(1)"));
    }
}
