//! Bot-authored messages shown in the chat transcript

use crate::state_machine::state::Operation;

pub const GREETING: &str =
    "Olá! Eu sou o Calcula Aí e vou te ajudar a praticar matemática.";

pub const ASK_OPERATION: &str =
    "Qual operação você quer praticar? Adição, subtração, multiplicação ou divisão?";

pub const ASK_NEW_OPERATION: &str =
    "Vamos praticar outra operação? Escolha: adição, subtração, multiplicação ou divisão.";

pub const INVALID_OPERATION: &str =
    "Não reconheci essa operação. Digite adição, subtração, multiplicação ou divisão.";

pub const UNSUPPORTED_AGE: &str = "Ainda não tenho conteúdo para essa idade. \
     Digite uma idade entre 3 e 25 anos.";

pub const NON_NUMERIC_AGE: &str = "Digite sua idade usando apenas números, por exemplo: 8.";

pub const UNKNOWN_STATE: &str = "Me perdi na conversa. Vamos recomeçar.";

pub const MISSING_QUESTION: &str =
    "Não consegui preparar uma pergunta para você agora. Vamos recomeçar.";

pub const INCOMPLETE_ANSWER_FEEDBACK: &str =
    "Não consegui avaliar sua resposta por completo.";

pub const MISSING_FEEDBACK_QUESTION: &str =
    "Não consegui continuar com os exemplos desse assunto.";

pub const TOPIC_CLOSED: &str = "Acabaram os exemplos sobre esse assunto. Muito bem!";

pub const APOLOGY: &str =
    "Desculpe, não consegui falar com o servidor. Vamos tentar de novo do começo.";

/// Ask for the student's age, naming the operation they picked
pub fn ask_age(operation: Operation) -> String {
    format!("Ótimo, vamos praticar {operation}! Quantos anos você tem?")
}

/// Interpret a yes/no reply about a practical example
pub fn is_affirmative(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "sim" || input == "true"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_age_names_operation() {
        assert!(ask_age(Operation::Subtraction).contains("subtração"));
    }

    #[test]
    fn test_affirmative_is_case_insensitive() {
        assert!(is_affirmative("sim"));
        assert!(is_affirmative("SIM"));
        assert!(is_affirmative(" True "));
        assert!(!is_affirmative("não"));
        assert!(!is_affirmative("simples"));
        assert!(!is_affirmative("yes"));
    }
}
