//! Step descriptions, check labels and templates per locale

use crate::config::Locale;
use crate::lexer::CryptoOp;
use crate::rules::Axiom;

impl Locale {
    pub(crate) fn initial_description(self, algorithm: &str) -> String {
        match self {
            Locale::En => format!("Initial security condition for {}", algorithm),
            Locale::Ru => format!("Начальное условие безопасности для {}", algorithm),
        }
    }

    pub(crate) fn initial_check(self) -> &'static str {
        match self {
            Locale::En => "initialization",
            Locale::Ru => "Инициализация анализа",
        }
    }

    pub(crate) fn axiom_description(self, axiom: &Axiom) -> String {
        match self {
            Locale::En => format!("Added security rule: {}", axiom.name),
            Locale::Ru => format!("Добавлено правило безопасности: {}", axiom.name),
        }
    }

    pub(crate) fn axiom_check(self) -> &'static str {
        match self {
            Locale::En => "cryptographic check",
            Locale::Ru => "Криптографическая проверка",
        }
    }

    pub(crate) fn assignment_description(self, line: &str) -> String {
        match self {
            Locale::En => format!("After cryptographic assignment: {}", line),
            Locale::Ru => format!("После криптографического присваивания: {}", line),
        }
    }

    pub(crate) fn branch_description(self) -> &'static str {
        match self {
            Locale::En => "Security branch analysis",
            Locale::Ru => "Анализ ветвления безопасности",
        }
    }

    pub(crate) fn branch_check(self, guard: &str) -> String {
        match self {
            Locale::En => format!("Guard check: {}", guard),
            Locale::Ru => format!("Проверка условия: {}", guard),
        }
    }

    pub(crate) fn crypto_description(self, op: CryptoOp) -> &'static str {
        match (self, op) {
            (Locale::En, CryptoOp::Encrypt) => "Encryption operation analysis",
            (Locale::En, CryptoOp::Decrypt) => "Decryption operation analysis",
            (Locale::Ru, CryptoOp::Encrypt) => "Анализ операции шифрования",
            (Locale::Ru, CryptoOp::Decrypt) => "Анализ операции дешифрования",
        }
    }

    pub(crate) fn crypto_check(self, op: CryptoOp) -> &'static str {
        match (self, op) {
            (Locale::En, CryptoOp::Encrypt) => "encryption correctness check",
            (Locale::En, CryptoOp::Decrypt) => "decryption correctness check",
            (Locale::Ru, CryptoOp::Encrypt) => "Проверка корректности шифрования",
            (Locale::Ru, CryptoOp::Decrypt) => "Проверка корректности дешифрования",
        }
    }

    pub(crate) fn assessment(self, secure: bool, algorithm: &str) -> String {
        match (self, secure) {
            (Locale::En, true) => format!(
                "Algorithm '{}' passed the security check. All preconditions meet the cryptographic strength requirements.",
                algorithm
            ),
            (Locale::En, false) => format!(
                "Algorithm '{}' has potential vulnerabilities. An additional security audit is recommended.",
                algorithm
            ),
            (Locale::Ru, true) => format!(
                "Алгоритм '{}' прошел проверку безопасности. Все предусловия удовлетворяют требованиям криптографической стойкости.",
                algorithm
            ),
            (Locale::Ru, false) => format!(
                "Алгоритм '{}' имеет потенциальные уязвимости. Рекомендуется провести дополнительный аудит безопасности.",
                algorithm
            ),
        }
    }

    /// Labels of the four triple lines: security, algorithm, code, guarantee
    pub(crate) fn triple_labels(self) -> [&'static str; 4] {
        match self {
            Locale::En => ["SECURITY", "ALGORITHM", "CODE", "GUARANTEE"],
            Locale::Ru => ["БЕЗОПАСНОСТЬ", "АЛГОРИТМ", "КОД", "ГАРАНТИЯ"],
        }
    }
}
