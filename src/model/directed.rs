//! Defines a `DirectedModel`, which is a Bayesian model that represents the factorization of
//! a probability distribution P

use crate::error::{NetError, Result};
use crate::factor::Factor;
use crate::variable::{Assignment, Variable};
use super::Model;

use indexmap::IndexMap;
use log::{debug, warn};

use std::collections::{HashMap, HashSet};


/// Represents a Bayesian Network - a Directed Probabilistic Graphical Model.
///
/// # Representation
/// The structure of the network is a Directed Acyclic Graph (DAG) stored as the parents of each
/// `Variable`. The `Variable`s are held in their topological order to faciliate efficient
/// computations over the graph. The Conditional Probability Distributions (CPDs) are attached
/// to the structure after it is built, see `DirectedModel::add_cpds`.
pub struct DirectedModel {

    /// The `Variable`s comprising the scope of the `DirectedModel` and their parents. There are
    /// edges ```P -> X forall P in graph[X]```
    graph: IndexMap<Variable, Vec<Variable>>,

    /// The CPD attached to each `Variable`. The `Factor` associated with a `Variable` ```X``` has
    /// scope ```Pa(X) U X```
    cpds: HashMap<Variable, Factor>,

    /// The user-defined names of each `Variable` ```(`Variable`->Name)```
    names: HashMap<Variable, String>,

    /// The reverse lookup ```(Name->`Variable`)```
    by_name: HashMap<String, Variable>

}

impl DirectedModel {

    /// Attach CPDs to the `Variable`s of the model. A CPD replaces any CPD previously attached to
    /// its `Variable`.
    ///
    /// Either all CPDs are attached, or none are.
    ///
    /// # Errors
    /// * `NetError::NotACPD` if a `Factor` is not normalized
    /// * `NetError::UnknownVariable` if a CPD is over a `Variable` that is not in the model
    /// * `NetError::InvalidScope` if the evidence of a CPD is not exactly the parents of its
    ///   `Variable`
    pub fn add_cpds(&mut self, cpds: Vec<Factor>) -> Result<()> {
        for cpd in cpds.iter() {
            self.check_cpd(cpd)?;
        }

        for cpd in cpds {
            let var = cpd.variable();
            debug!("attaching CPD for {}", self.name_of(&var));

            if self.cpds.insert(var, cpd).is_some() {
                warn!("replacing existing CPD for {}", self.name_of(&var));
            }
        }

        Ok(())
    }


    /// Get the CPD for the given variable in this model.
    pub fn cpd(&self, v: &Variable) -> Option<&Factor> {
        self.cpds.get(v)
    }


    /// Get the CPD for the given variable, failing if none is attached.
    pub fn cpd_or_err(&self, v: &Variable) -> Result<&Factor> {
        self.cpds.get(v).ok_or_else(|| NetError::MissingCpd(self.name_of(v)))
    }


    /// Get the CPD for the `Variable` with the given name.
    pub fn cpd_by_name(&self, name: &str) -> Option<&Factor> {
        self.lookup_variable(name).and_then(|v| self.cpd(v))
    }


    /// Get all attached CPDs, in topological order
    pub fn cpds(&self) -> Vec<&Factor> {
        self.graph.keys().filter_map(|v| self.cpds.get(v)).collect()
    }


    /// Get a topological order of the `DirectedModel`
    pub fn topological_order(&self) -> Vec<Variable> {
        self.graph.keys().cloned().collect()
    }


    /// Get the parents of a `Variable`, in topological order
    pub fn parents(&self, v: &Variable) -> Option<&[Variable]> {
        self.graph.get(v).map(|p| p.as_slice())
    }


    /// Get the edges ```(parent, child)``` of the DAG, ordered by child then parent
    pub fn edges(&self) -> Vec<(Variable, Variable)> {
        self.graph.iter()
                  .flat_map(|(&child, parents)| parents.iter().map(move |&p| (p, child)))
                  .collect()
    }


    /// Verify the model is complete: every `Variable` has a CPD that agrees with the structure.
    ///
    /// # Errors
    /// * `NetError::MissingCpd` naming the first `Variable` (in topological order) without a CPD
    /// * any error of `DirectedModel::add_cpds`
    pub fn check_model(&self) -> Result<()> {
        for var in self.graph.keys() {
            self.check_cpd(self.cpd_or_err(var)?)?;
        }

        Ok(())
    }


    /// The name of a `Variable`, or its anonymous identifier if the model does not know it
    pub fn name_of(&self, var: &Variable) -> String {
        self.lookup_name(var).cloned().unwrap_or_else(|| var.to_string())
    }


    /// Internal function that validates a CPD against the structure
    fn check_cpd(&self, cpd: &Factor) -> Result<()> {
        if ! cpd.is_cpd() {
            return Err(NetError::NotACPD);
        }

        let var = cpd.variable();
        let parents = self.graph.get(&var)
                                .ok_or_else(|| NetError::UnknownVariable(var.to_string()))?;

        let evidence: HashSet<&Variable> = cpd.evidence().iter().collect();
        if evidence.len() != parents.len() || ! parents.iter().all(|p| evidence.contains(p)) {
            return Err(NetError::InvalidScope);
        }

        Ok(())
    }
}

impl Model for DirectedModel {

    /// Lookup a `Variable` in the `DirectedModel` based on the name
    fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.by_name.get(name)
    }

    /// Lookup a `Variable`'s name in the `DirectedModel`.
    fn lookup_name(&self, var: &Variable) -> Option<&String> {
        self.names.get(var)
    }

    /// Get all `Variable`s in the model.
    fn variables(&self) -> HashSet<Variable> {
        self.graph.keys().cloned().collect()
    }

    /// Get the number of `Variable`s in the the `DirectedModel`
    fn num_variables(&self) -> usize {
        self.graph.len()
    }

    /// Determine the probability of a full `Assignment` to the `Variable`s in the `DirectedModel`.
    fn probability(&self, assignment: &Assignment) -> Result<f64> {
        // chain rule: P(X1..Xn) = prod P(Xi | Pa(Xi))
        self.graph.keys().try_fold(1.0, |p, var| -> Result<f64> {
            Ok(p * self.cpd_or_err(var)?.value(assignment)?)
        })
    }
}


/// An implementation of the [builder pattern] for creating the structure of a `DirectedModel`.
///
/// Models must be assembled in topological order: every parent has to be added before its
/// children, which also guarantees the graph is acyclic.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
pub struct DirectedModelBuilder {

    /// The `Variable`s and their parents
    graph: IndexMap<Variable, Vec<Variable>>,

    /// The names of each `Variable`
    names: HashMap<Variable, String>,

    /// The reverse lookup of `names`
    by_name: HashMap<String, Variable>,

    /// The error state of the builder
    err: Option<NetError>

}


impl DirectedModelBuilder {

    /// Construct a new `DirectedModelBuilder` representing an empty `DirectedModel`
    pub fn new() -> Self {
        DirectedModelBuilder {
            graph: IndexMap::new(),
            names: HashMap::new(),
            by_name: HashMap::new(),
            err: None
        }
    }


    /// Add an anonymous `Variable` to the `DirectedModel`.
    ///
    /// # Args
    /// * `var`: the variable to add to the model
    /// * `parents`: the parent variables. The parents must already be in the model.
    pub fn with_variable(self, var: &Variable, parents: HashSet<Variable>) -> Self {
        self.add_variable(var, var.to_string(), parents)
    }


    /// Add a named `Variable` to the `DirectedModel`.
    ///
    /// # Args
    /// * `var`: the variable to add to the model
    /// * `name`: the name for the variable. Names must be unique within a model.
    /// * `parents`: the parent variables. The parents must already be in the model.
    pub fn with_named_variable(self, var: &Variable, name: &str, parents: HashSet<Variable>) -> Self {
        self.add_variable(var, String::from(name), parents)
    }


    /// Complete building the model.
    ///
    /// # Returns
    /// the `DirectedModel` without any CPDs attached, or the first error generated during the
    /// building process
    pub fn build(self) -> Result<DirectedModel> {
        if let Some(e) = self.err {
            Err(e)
        } else {
            Ok(DirectedModel {
                graph: self.graph,
                cpds: HashMap::new(),
                names: self.names,
                by_name: self.by_name
            })
        }
    }

    /// Internal function that acutally does the variable addition to the model
    fn add_variable(mut self, var: &Variable, name: String, parents: HashSet<Variable>) -> Self {
        ///////////////////////////////////////////////////////////////////////
        // 1) if we are in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Check for error conditions
        if parents.iter().any(|v| ! self.graph.contains_key(v)) {
            self.err = Some(NetError::MissingParent);
            return self;
        }

        if self.graph.contains_key(var) || self.by_name.contains_key(&name) {
            self.err = Some(NetError::DuplicateVariable);
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Add to current model, keeping parents in topological order
        let mut parents: Vec<Variable> = parents.into_iter().collect();
        parents.sort_by_key(|p| self.graph.get_index_of(p));

        self.graph.insert(*var, parents);
        self.by_name.insert(name.clone(), *var);
        self.names.insert(*var, name);

        self
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::array;

    /// The student network of Koller & Friedman Section 3.1.2, restricted to I and S
    fn student() -> (Variable, Variable, DirectedModel) {
        let intelligence = Variable::binary();
        let sat = Variable::binary();

        let mut model = DirectedModelBuilder::new()
            .with_named_variable(&intelligence, "I", HashSet::new())
            .with_named_variable(&sat, "S", vec![intelligence].into_iter().collect())
            .build()
            .unwrap();

        let icpd = Factor::tabular_cpd(intelligence, array![[0.7], [0.3]], vec![]).unwrap();
        let scpd = Factor::cpd(sat, vec![intelligence], array![[0.95, 0.05], [0.2, 0.8]].into_dyn()).unwrap();
        model.add_cpds(vec![icpd, scpd]).unwrap();

        (intelligence, sat, model)
    }

    #[test]
    fn build_empty() {
        let model = DirectedModelBuilder::new().build();

        assert!(! model.is_err());

        let model = model.unwrap();
        assert_eq!(model.num_variables(), 0);
        assert!(model.variables().is_empty());
        assert!(model.edges().is_empty());
        assert!(model.check_model().is_ok());
    }


    #[test]
    /// Tests building a model with a single anonymous binary variable
    fn build_simple() {
        let v = Variable::binary();
        let model = DirectedModelBuilder::new().with_variable(&v, HashSet::new()).build().unwrap();

        let vars = model.variables();
        assert_eq!(1, vars.len());
        assert!(vars.contains(&v));
        let name = model.lookup_name(&v).unwrap();
        assert_eq!(&v.to_string(), name);
        let v2 = model.lookup_variable(name.as_str()).unwrap();
        assert_eq!(&v, v2);

        // no cpd attached yet
        assert!(model.cpd(&v).is_none());
        assert_eq!(Err(NetError::MissingCpd(v.to_string())), model.check_model());
    }


    #[test]
    fn build_errs() {
        let a = Variable::binary();
        let b = Variable::binary();

        // parent added after the child
        let model = DirectedModelBuilder::new()
            .with_named_variable(&b, "b", vec![a].into_iter().collect())
            .with_named_variable(&a, "a", HashSet::new())
            .build();
        assert_eq!(Some(NetError::MissingParent), model.err());

        // same variable twice
        let model = DirectedModelBuilder::new()
            .with_named_variable(&a, "a", HashSet::new())
            .with_named_variable(&a, "b", HashSet::new())
            .build();
        assert_eq!(Some(NetError::DuplicateVariable), model.err());

        // same name twice
        let model = DirectedModelBuilder::new()
            .with_named_variable(&a, "a", HashSet::new())
            .with_named_variable(&b, "a", HashSet::new())
            .build();
        assert_eq!(Some(NetError::DuplicateVariable), model.err());
    }


    #[test]
    fn structure() {
        let a = Variable::binary();
        let b = Variable::binary();
        let c = Variable::binary();

        let model = DirectedModelBuilder::new()
            .with_named_variable(&a, "a", HashSet::new())
            .with_named_variable(&b, "b", HashSet::new())
            .with_named_variable(&c, "c", vec![b, a].into_iter().collect())
            .build()
            .unwrap();

        assert_eq!(vec![a, b, c], model.topological_order());
        assert_eq!(Some(&[a, b][..]), model.parents(&c));
        assert_eq!(Some(&[][..]), model.parents(&a));
        assert_eq!(vec![(a, c), (b, c)], model.edges());
    }


    #[test]
    fn attach_cpds() {
        let (intelligence, sat, model) = student();

        assert!(model.check_model().is_ok());
        assert_eq!(2, model.cpds().len());
        assert_eq!(intelligence, model.cpds()[0].variable());
        assert_eq!(sat, model.cpds()[1].variable());
        assert_eq!(array![[0.7], [0.3]], model.cpd_by_name("I").unwrap().values());
        assert_eq!(
            array![[0.95, 0.2], [0.05, 0.8]],
            model.cpd(&sat).unwrap().values()
        );
        assert!(model.cpd_by_name("G").is_none());
    }


    #[test]
    fn attach_cpds_errs() {
        let (intelligence, sat, mut model) = student();
        let before = model.cpd(&sat).unwrap().values();

        // unknown variable
        let other = Variable::binary();
        let f = Factor::tabular_cpd(other, array![[0.5], [0.5]], vec![]).unwrap();
        assert_eq!(Err(NetError::UnknownVariable(other.to_string())), model.add_cpds(vec![f]));

        // evidence does not match the parents
        let f = Factor::tabular_cpd(sat, array![[0.5], [0.5]], vec![]).unwrap();
        assert_eq!(Err(NetError::InvalidScope), model.add_cpds(vec![f]));

        // not a cpd
        let f = Factor::new(vec![intelligence], array![1.0, 2.0].into_dyn(), false).unwrap();
        assert_eq!(Err(NetError::NotACPD), model.add_cpds(vec![f]));

        // a valid cpd followed by an invalid one leaves the model unchanged
        let good = Factor::tabular_cpd(sat, array![[0.5, 0.5], [0.5, 0.5]], vec![intelligence]).unwrap();
        let bad = Factor::tabular_cpd(other, array![[0.5], [0.5]], vec![]).unwrap();
        assert!(model.add_cpds(vec![good, bad]).is_err());
        assert_eq!(before, model.cpd(&sat).unwrap().values());
    }


    #[test]
    fn replace_cpd() {
        let (intelligence, _, mut model) = student();

        let f = Factor::tabular_cpd(intelligence, array![[0.1], [0.9]], vec![]).unwrap();
        model.add_cpds(vec![f]).unwrap();
        assert_eq!(array![[0.1], [0.9]], model.cpd(&intelligence).unwrap().values());
    }


    #[test]
    /// Example taken from Koller & Friedman Section 3.1.2
    fn probability() {
        let (intelligence, sat, model) = student();

        let expected = [[0.7 * 0.95, 0.7 * 0.05], [0.3 * 0.2, 0.3 * 0.8]];
        for (i, s) in itertools::iproduct!(0..2, 0..2) {
            let mut a = Assignment::new();
            a.set(&intelligence, i);
            a.set(&sat, s);
            assert_eq!(expected[i][s], model.probability(&a).unwrap());
        }

        // test partial assignment
        let mut a = Assignment::new();
        a.set(&intelligence, 1);
        assert_eq!(Err(NetError::IncompleteAssignment), model.probability(&a));
    }
}
