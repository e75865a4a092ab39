use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::options::{
    BudgetRange, ComplexityPreference, CostType, DigitalLevel, EmployeeBand, ExportScope,
    HelpNext, Industry, LegalEntity, MainGoal, PreviousFunding, PriorProgram, ProjectDetailLevel,
    ProjectType, Region, RevenueBand, SupportType, Timeline, ToolTag,
};

/// One screen of the intake wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Profile,
    Project,
    Budget,
    Preferences,
    Review,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Profile,
            Self::Project,
            Self::Budget,
            Self::Preferences,
            Self::Review,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Profile => 0,
            Self::Project => 1,
            Self::Budget => 2,
            Self::Preferences => 3,
            Self::Review => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Profile => "Business Profile",
            Self::Project => "Project Overview",
            Self::Budget => "Budget",
            Self::Preferences => "Preferences",
            Self::Review => "Review",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

/// A costed line of the project budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: String,
    pub name: String,
    pub cost: f64,
}

impl BudgetItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost: sanitize_cost(cost),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let id = match fields.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        };
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let cost = fields.get("cost").and_then(Value::as_f64).unwrap_or(0.0);
        Some(Self::new(id, name, cost))
    }
}

/// Costs are never negative and never NaN/infinite.
pub fn sanitize_cost(cost: f64) -> f64 {
    if cost.is_finite() && cost > 0.0 {
        cost
    } else {
        0.0
    }
}

fn default_budget_items() -> Vec<BudgetItem> {
    vec![
        BudgetItem::new("1", "Software Licenses (ERP/CRM)", 0.0),
        BudgetItem::new("2", "Implementation Consultants", 0.0),
        BudgetItem::new("3", "Training", 0.0),
    ]
}

/// Every answer collected by the intake wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnswers {
    pub location: Option<Region>,
    pub legal_entity: Option<LegalEntity>,
    pub industry: Option<Industry>,
    pub employees: Option<EmployeeBand>,
    pub revenue: Option<RevenueBand>,
    pub is_exporting: bool,
    pub export_scope: ExportScope,

    pub current_tools: Vec<ToolTag>,
    pub digital_level: Option<DigitalLevel>,
    pub project_types: Vec<ProjectType>,
    pub timeline: Option<Timeline>,
    pub main_goal: Option<MainGoal>,
    pub project_detail_level: Option<ProjectDetailLevel>,
    pub description: String,

    pub budget_range: Option<BudgetRange>,
    pub budget_items: Vec<BudgetItem>,
    pub major_cost_types: Vec<CostType>,

    pub previous_funding: PreviousFunding,
    pub previous_programs: Vec<PriorProgram>,
    pub support_type: SupportType,
    pub reimbursement_ok: bool,
    pub has_project_manager: bool,
    pub complexity_preference: Option<ComplexityPreference>,

    pub contact_name: String,
    pub company_name: String,
    pub email: String,
    pub help_next: Option<HelpNext>,

    pub disclaimer_accepted: bool,
}

impl Default for FormAnswers {
    fn default() -> Self {
        Self {
            location: None,
            legal_entity: None,
            industry: None,
            employees: None,
            revenue: None,
            is_exporting: false,
            export_scope: ExportScope::QcOnly,
            current_tools: Vec::new(),
            digital_level: None,
            project_types: Vec::new(),
            timeline: None,
            main_goal: None,
            project_detail_level: None,
            description: String::new(),
            budget_range: None,
            budget_items: default_budget_items(),
            major_cost_types: Vec::new(),
            previous_funding: PreviousFunding::No,
            previous_programs: Vec::new(),
            support_type: SupportType::Any,
            reimbursement_ok: true,
            has_project_manager: false,
            complexity_preference: Some(ComplexityPreference::Maximize),
            contact_name: String::new(),
            company_name: String::new(),
            email: String::new(),
            help_next: None,
            disclaimer_accepted: false,
        }
    }
}

impl FormAnswers {
    pub fn total_budget(&self) -> f64 {
        self.budget_items.iter().map(|item| item.cost).sum()
    }

    /// Rebuilds answers from persisted JSON, keeping defaults for any field
    /// that is missing or carries the wrong shape.
    pub fn from_persisted(value: &Value) -> Hydrated {
        let empty = Map::new();
        let fields = value.as_object().unwrap_or(&empty);
        let defaults = Self::default();
        let mut hydrator = Hydrator {
            fields,
            rejected: Vec::new(),
        };
        if !value.is_object() {
            hydrator.rejected.push("<root>");
        }

        let answers = Self {
            location: hydrator.choice("location"),
            legal_entity: hydrator.choice("legalEntity"),
            industry: hydrator.choice("industry"),
            employees: hydrator.choice("employees"),
            revenue: hydrator.choice("revenue"),
            is_exporting: hydrator.value("isExporting", defaults.is_exporting),
            export_scope: hydrator.value("exportScope", defaults.export_scope),
            current_tools: hydrator.tags("currentTools"),
            digital_level: hydrator.choice("digitalLevel"),
            project_types: hydrator.tags("projectTypes"),
            timeline: hydrator.choice("timeline"),
            main_goal: hydrator.choice("mainGoal"),
            project_detail_level: hydrator.choice("projectDetailLevel"),
            description: hydrator.value("description", defaults.description),
            budget_range: hydrator.choice("budgetRange"),
            budget_items: hydrator.budget_items("budgetItems", defaults.budget_items),
            major_cost_types: hydrator.tags("majorCostTypes"),
            previous_funding: hydrator.value("previousFunding", defaults.previous_funding),
            previous_programs: hydrator.tags("previousPrograms"),
            support_type: hydrator.value("supportType", defaults.support_type),
            reimbursement_ok: hydrator.value("reimbursementOk", defaults.reimbursement_ok),
            has_project_manager: hydrator
                .value("hasProjectManager", defaults.has_project_manager),
            complexity_preference: hydrator
                .choice_or("complexityPreference", defaults.complexity_preference),
            contact_name: hydrator.value("contactName", defaults.contact_name),
            company_name: hydrator.value("companyName", defaults.company_name),
            email: hydrator.value("email", defaults.email),
            help_next: hydrator.choice("helpNext"),
            disclaimer_accepted: hydrator
                .value("disclaimerAccepted", defaults.disclaimer_accepted),
        };

        Hydrated {
            answers,
            rejected_fields: hydrator.rejected,
        }
    }

    /// Shallow merge: every field present in the patch replaces the current
    /// value wholesale.
    pub fn apply(&mut self, patch: FormPatch) {
        let FormPatch {
            location,
            legal_entity,
            industry,
            employees,
            revenue,
            is_exporting,
            export_scope,
            current_tools,
            digital_level,
            project_types,
            timeline,
            main_goal,
            project_detail_level,
            description,
            budget_range,
            budget_items,
            major_cost_types,
            previous_funding,
            previous_programs,
            support_type,
            reimbursement_ok,
            has_project_manager,
            complexity_preference,
            contact_name,
            company_name,
            email,
            help_next,
            disclaimer_accepted,
        } = patch;

        replace(&mut self.location, location);
        replace(&mut self.legal_entity, legal_entity);
        replace(&mut self.industry, industry);
        replace(&mut self.employees, employees);
        replace(&mut self.revenue, revenue);
        replace(&mut self.is_exporting, is_exporting);
        replace(&mut self.export_scope, export_scope);
        replace(&mut self.current_tools, current_tools.map(dedupe));
        replace(&mut self.digital_level, digital_level);
        replace(&mut self.project_types, project_types.map(dedupe));
        replace(&mut self.timeline, timeline);
        replace(&mut self.main_goal, main_goal);
        replace(&mut self.project_detail_level, project_detail_level);
        replace(&mut self.description, description);
        replace(&mut self.budget_range, budget_range);
        replace(
            &mut self.budget_items,
            budget_items.map(|items| {
                items
                    .into_iter()
                    .map(|item| BudgetItem::new(item.id, item.name, item.cost))
                    .collect()
            }),
        );
        replace(&mut self.major_cost_types, major_cost_types.map(dedupe));
        replace(&mut self.previous_funding, previous_funding);
        replace(&mut self.previous_programs, previous_programs.map(dedupe));
        replace(&mut self.support_type, support_type);
        replace(&mut self.reimbursement_ok, reimbursement_ok);
        replace(&mut self.has_project_manager, has_project_manager);
        replace(&mut self.complexity_preference, complexity_preference);
        replace(&mut self.contact_name, contact_name);
        replace(&mut self.company_name, company_name);
        replace(&mut self.email, email);
        replace(&mut self.help_next, help_next);
        replace(&mut self.disclaimer_accepted, disclaimer_accepted);
    }
}

/// Partial update of [`FormAnswers`]; absent fields are left untouched.
/// Choice fields sent as `null` or `""` are cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FormPatch {
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<Region>>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub legal_entity: Option<Option<LegalEntity>>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub industry: Option<Option<Industry>>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub employees: Option<Option<EmployeeBand>>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Option<RevenueBand>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_exporting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_scope: Option<ExportScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_tools: Option<Vec<ToolTag>>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub digital_level: Option<Option<DigitalLevel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_types: Option<Vec<ProjectType>>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Option<Timeline>>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub main_goal: Option<Option<MainGoal>>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub project_detail_level: Option<Option<ProjectDetailLevel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<Option<BudgetRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_items: Option<Vec<BudgetItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_cost_types: Option<Vec<CostType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_funding: Option<PreviousFunding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_programs: Option<Vec<PriorProgram>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_type: Option<SupportType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reimbursement_ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_project_manager: Option<bool>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub complexity_preference: Option<Option<ComplexityPreference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "choice_update", skip_serializing_if = "Option::is_none")]
    pub help_next: Option<Option<HelpNext>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer_accepted: Option<bool>,
}

/// Result of rehydrating persisted answers.
#[derive(Debug, Clone)]
pub struct Hydrated {
    pub answers: FormAnswers,
    /// Persisted keys whose value was discarded in favour of the default.
    pub rejected_fields: Vec<&'static str>,
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn choice_update<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Some(None)),
        Value::String(raw) if raw.is_empty() => Ok(Some(None)),
        raw => T::deserialize(raw)
            .map(|value| Some(Some(value)))
            .map_err(serde::de::Error::custom),
    }
}

fn dedupe<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

struct Hydrator<'a> {
    fields: &'a Map<String, Value>,
    rejected: Vec<&'static str>,
}

impl Hydrator<'_> {
    fn value<T: DeserializeOwned>(&mut self, key: &'static str, default: T) -> T {
        match self.fields.get(key) {
            None => default,
            Some(raw) => match T::deserialize(raw) {
                Ok(value) => value,
                Err(_) => {
                    self.rejected.push(key);
                    default
                }
            },
        }
    }

    fn choice<T: DeserializeOwned>(&mut self, key: &'static str) -> Option<T> {
        self.choice_or(key, None)
    }

    /// Enum answers: `null` and `""` mean "not answered yet"; anything outside
    /// the option set is discarded.
    fn choice_or<T: DeserializeOwned>(&mut self, key: &'static str, default: Option<T>) -> Option<T> {
        match self.fields.get(key) {
            None => default,
            Some(Value::Null) => None,
            Some(Value::String(raw)) if raw.is_empty() => None,
            Some(raw) => match T::deserialize(raw) {
                Ok(value) => Some(value),
                Err(_) => {
                    self.rejected.push(key);
                    default
                }
            },
        }
    }

    fn tags<T: DeserializeOwned + PartialEq>(&mut self, key: &'static str) -> Vec<T> {
        match self.fields.get(key) {
            None => Vec::new(),
            Some(Value::Array(entries)) => {
                let parsed: Vec<T> = entries
                    .iter()
                    .filter_map(|entry| T::deserialize(entry).ok())
                    .collect();
                if parsed.len() != entries.len() {
                    self.rejected.push(key);
                }
                dedupe(parsed)
            }
            Some(_) => {
                self.rejected.push(key);
                Vec::new()
            }
        }
    }

    fn budget_items(&mut self, key: &'static str, default: Vec<BudgetItem>) -> Vec<BudgetItem> {
        match self.fields.get(key) {
            None => default,
            Some(Value::Array(entries)) => entries.iter().filter_map(BudgetItem::from_value).collect(),
            Some(_) => {
                self.rejected.push(key);
                default
            }
        }
    }
}
