use crate::config::Config;

pub(crate) const OUTROS: &str = "Outros";
pub(crate) const PAGAMENTO_CREDITO: &str = "Pagamento/Crédito";

/// Built-in keyword groups, evaluated top to bottom. Order matters: payments
/// and refunds win over everything, parking and fuel merchants must come
/// before rideshare, and rideshare before generic food words.
const DEFAULT_RULES: [(&[&str], &str); 12] = [
    (&["pagamento recebido", "ajuste a crédito", "estorno"], PAGAMENTO_CREDITO),
    (&["claro", "vivo", "tim", "oi", "net", "enel", "sabesp", "condominio", "aluguel",
       "iptu", "luz", "agua", "gas", "imobiliaria"], "Moradia"),
    (&["mercado", "supermercado", "assai", "carrefour", "pão de açúcar", "extra", "chama",
       "açougue", "sacolão", "hortifruti", "atacadista", "hirota", "aneto"],
     "Alimentação (Mercado/Sacolão)"),
    (&["posto", "abastece", "estacionamento", "sem par", "veloe", "w r car", "ipva",
       "seguro auto", "mecanica", "auto posto", "gasolina", "park"],
     "Transporte (Combustível/Estacionamento/Manutenção)"),
    (&["uber", "99app", "99*", "taxi", "pop"], "Transporte (Uber/99)"),
    (&["farmacia", "drogasil", "drogaria", "drugstore", "saude", "hospital", "clinica",
       "medico", "laboratorio", "genera", "promofarma"], "Saúde/Farmácia"),
    (&["pet", "cobasi", "bichos", "veterinario", "banho e tosa"], "Pets"),
    (&["spotify", "netflix", "youtube", "prime", "hbo", "disney", "nubank", "anuidade",
       "tarifa", "google", "apple"], "Assinaturas/Serviços"),
    (&["ifood", "ifd*", "delivery", "restaurante", "choperia", "padaria", "burger", "pizza",
       "mcdonald", "bk ", "food", "lanches", "bar ", "gastrobar", "pizzaria", "sorvetes",
       "loteria", "jogos", "steam", "cinema", "ingresso"], "Lazer/Restaurantes"),
    (&["shopee", "aliexpress", "amazon", "mercadolivre", "magalu", "shein", "bravium",
       "confeccoes", "magazine", "lojas", "store", "roupas", "calcados", "perfumaria",
       "cosmetico", "cabelo", "barbearia"], "Pessoal/Vestuário"),
    (&["curso", "escola", "faculdade", "udemy", "alura", "hotmart", "educacao"],
     "Educação/Cursos"),
    (&["leroy", "cec", "telhanorte", "ferragens", "construcao", "telha"], "Manutenção Casa"),
];

/// Keyword driven categorisation service
pub(crate) struct RuleClassifier {
    rules: Vec<(Vec<String>, String)>,
}

impl RuleClassifier {
    /// Build from the rules file when it defines any group, otherwise from
    /// the built-in table.
    pub(crate) fn new(config: &Config) -> RuleClassifier {
        let rules = if config.rules.is_empty() {
            DEFAULT_RULES.iter()
                .map(|(keywords, category)| {
                    (keywords.iter().map(|k| k.to_string()).collect(), category.to_string())
                })
                .collect()
        } else {
            config.rules.iter()
                .map(|group| {
                    (group.keywords.iter().map(|k| k.to_lowercase()).collect(), group.category.clone())
                })
                .collect()
        };

        RuleClassifier { rules }
    }

    /// Categorise a transaction title. The first keyword group with any hit
    /// wins; anything unrecognised falls back to "Outros".
    pub(crate) fn categorise(&self, title: &str) -> String {
        let title = title.to_lowercase();

        for (keywords, category) in &self.rules {
            if keywords.iter().any(|keyword| title.contains(keyword.as_str())) {
                return category.clone();
            }
        }

        OUTROS.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use super::RuleClassifier;

    fn classifier() -> RuleClassifier {
        RuleClassifier::new(&Config::empty())
    }

    #[test]
    fn first_matching_group_wins() {
        let classifier = classifier();
        // 'uber' is evaluated before 'pizza'
        assert_eq!(classifier.categorise("Uber Eats Pizza"), "Transporte (Uber/99)");
        // 'posto' is evaluated before 'uber'
        assert_eq!(classifier.categorise("Auto Posto Trevo uber"), "Transporte (Combustível/Estacionamento/Manutenção)");
        assert_eq!(classifier.categorise("PAGAMENTO RECEBIDO"), "Pagamento/Crédito");
    }

    #[test]
    fn case_insensitive() {
        let classifier = classifier();
        assert_eq!(classifier.categorise("MERCADO EXTRA"), "Alimentação (Mercado/Sacolão)");
        assert_eq!(classifier.categorise("mercado extra"), "Alimentação (Mercado/Sacolão)");
    }

    #[test]
    fn unknown_titles_fall_back() {
        let classifier = classifier();
        assert_eq!(classifier.categorise("ZZZ Desconhecido"), "Outros");
        assert_eq!(classifier.categorise("PG *MAQUININHA"), "Outros");
        assert_eq!(classifier.categorise(""), "Outros");
    }

    #[test]
    fn deterministic() {
        let classifier = classifier();
        let first = classifier.categorise("Farmacia Iguatemi 1234");
        for _ in 0..10 {
            assert_eq!(classifier.categorise("Farmacia Iguatemi 1234"), first);
        }
        assert_eq!(first, "Saúde/Farmácia");
    }

    #[test]
    fn config_rules_replace_built_in() {
        let config: Config = toml::from_str(r#"
            [[rules]]
            category = "Feira"
            keywords = ["BARRACA", "feira"]

            [[rules]]
            category = "Moradia"
            keywords = ["aluguel"]
        "#).unwrap();

        let classifier = RuleClassifier::new(&config);
        assert_eq!(classifier.categorise("Barraca do Zé"), "Feira");
        assert_eq!(classifier.categorise("Aluguel Fevereiro"), "Moradia");
        // built-in groups are gone once a rules file is supplied
        assert_eq!(classifier.categorise("Uber Trip"), "Outros");
    }
}
