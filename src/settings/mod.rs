use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::categoriser::{OUTROS, PAGAMENTO_CREDITO};
use crate::util::month_key;

/// User maintained taxonomy, budgets and income sources, kept as a JSON file
/// next to the ledger.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) categories: Vec<String>,
    /// Period key ("YYYY-MM", "YYYY-MM_<owner>", "default", "default_<owner>")
    /// to per category budget
    pub(crate) budgets: HashMap<String, HashMap<String, f32>>,
    pub(crate) income_sources: Vec<String>,
}

impl Default for Settings {
    fn default() -> Settings {
        let categories: Vec<String> = [
            "Moradia",
            "Alimentação (Mercado/Sacolão)",
            "Transporte (Combustível/Estacionamento/Manutenção)",
            "Transporte (Uber/99)",
            "Saúde/Farmácia",
            "Pessoal/Vestuário",
            "Lazer/Restaurantes",
            "Assinaturas/Serviços",
            "Pets",
            "Educação/Cursos",
            "Manutenção Casa",
            PAGAMENTO_CREDITO,
            OUTROS,
        ].into_iter().map(String::from).collect();

        let default_budget: HashMap<String, f32> = [
            ("Moradia", 2000.0),
            ("Alimentação (Mercado/Sacolão)", 1200.0),
            ("Transporte (Combustível/Estacionamento/Manutenção)", 600.0),
            ("Transporte (Uber/99)", 300.0),
            ("Saúde/Farmácia", 400.0),
            ("Pessoal/Vestuário", 300.0),
            ("Lazer/Restaurantes", 600.0),
            ("Assinaturas/Serviços", 200.0),
            ("Pets", 200.0),
            ("Educação/Cursos", 500.0),
            ("Manutenção Casa", 200.0),
            (OUTROS, 300.0),
        ].into_iter().map(|(category, amount)| (category.to_string(), amount)).collect();

        let mut budgets = HashMap::new();
        budgets.insert("default".to_string(), default_budget);

        let income_sources = ["Salário (Principal)", "Salário (Cônjuge)", "Renda Extra", "VR/VA"]
            .into_iter().map(String::from).collect();

        Settings { categories, budgets, income_sources }
    }
}

impl Settings {
    /// Load from file, falling back to the seeded defaults when the file is
    /// missing or unreadable.
    pub(crate) fn load(path: &Path) -> Settings {
        if path.is_file() {
            match fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => return settings,
                    Err(e) => warn!("Settings file {} is not valid, using defaults: {e}", path.display()),
                },
                Err(e) => warn!("Unable to read settings file {}: {e}", path.display()),
            }
        }

        Settings::default()
    }

    pub(crate) fn save(&self, path: &Path) -> anyhow::Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve the budget for a month. With an owner: that owner's month
    /// entry, else their standing default, else a clean slate. Owner splits
    /// never inherit the shared budget. Without an owner: the sum of every
    /// entry defined for the month, else the shared default.
    pub(crate) fn budgets_for(&self, year: i32, month: u32, owner: Option<&str>) -> HashMap<String, f32> {
        let period = month_key(year, month);

        if let Some(owner) = owner {
            if let Some(budget) = self.budgets.get(&format!("{period}_{owner}")) {
                return budget.clone();
            }
            if let Some(budget) = self.budgets.get(&format!("default_{owner}")) {
                return budget.clone();
            }
            return self.categories.iter().map(|c| (c.clone(), 0.0)).collect();
        }

        let mut merged: HashMap<String, f32> =
            self.categories.iter().map(|c| (c.clone(), 0.0)).collect();
        let mut found_any = false;
        for (key, budget) in &self.budgets {
            if key == &period || key.starts_with(&format!("{period}_")) {
                found_any = true;
                for (category, amount) in budget {
                    *merged.entry(category.clone()).or_insert(0.0) += amount;
                }
            }
        }

        if !found_any {
            return self.budgets.get("default").cloned().unwrap_or_default();
        }
        merged
    }

    pub(crate) fn set_budget(&mut self, period_key: &str, category: &str, amount: f32) {
        self.budgets.entry(period_key.to_string()).or_default().insert(category.to_string(), amount);
    }

    /// Add a category to the taxonomy. Returns false if it was already there.
    pub(crate) fn add_category(&mut self, name: &str) -> bool {
        if self.categories.iter().any(|c| c == name) {
            return false;
        }
        self.categories.push(name.to_string());
        true
    }

    /// Remove a category from the taxonomy. Returns false if absent. Callers
    /// guard the two catch-alls; existing transactions keep the old string.
    pub(crate) fn remove_category(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c != name);
        self.categories.len() < before
    }
}
