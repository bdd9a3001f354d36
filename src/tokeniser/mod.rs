use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    /// Transaction boilerplate that never identifies a merchant
    static ref STOPWORDS: HashSet<&'static str> = {
        let mut stopwords = HashSet::new();
        for word in [
            "com", "para", "por", "dos", "das", "sem",
            "compra", "compras", "pagamento", "pagto", "recebido",
            "transferencia", "transf", "pix", "ted", "doc", "boleto",
            "cartao", "debito", "credito", "fatura", "parcela", "parcelado",
            "banco", "agencia", "conta", "saque", "deposito",
            "ltda", "cia", "brasil", "sao",
        ] {
            stopwords.insert(word);
        }
        stopwords
    };
}

/// Break a transaction title into the tokens worth learning from. Lowercases,
/// treats `/`, `-` and `.` as spaces, then drops anything too short to mean
/// something, stopwords, and bare numbers.
pub(crate) fn tokenise(text: &str) -> Vec<String> {
    let text = text.to_lowercase().replace(['/', '-', '.'], " ");

    text.split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !STOPWORDS.contains(token))
        .filter(|token| !token.chars().all(|c| c.is_ascii_digit()))
        .map(|token| token.to_string())
        .collect()
}
