//! Reply tables for the built-in topics.
//!
//! These are domain content: the order of the rules inside each table is the
//! matching order, so reordering entries changes which reply a message gets.

use super::rules::{KeywordGenerator, KeywordRule};

pub const SOBRE_RULES: &[KeywordRule] = &[
    KeywordRule::new(
        &["história", "historia", "fundad", "origem", "quando surgiu"],
        "## Nossa história 📖

A Agent First nasceu da convicção de que agentes inteligentes vão mudar a forma como pessoas e empresas trabalham. Começamos resolvendo problemas concretos de pequenos negócios, como estoque e pedidos em vários canais, e crescemos a partir daí.

Quer saber mais sobre algum momento específico da nossa trajetória?",
    ),
    KeywordRule::new(
        &["missão", "missao", "visão", "visao", "valores", "propósito", "proposito"],
        "## Missão, visão e valores 🎯

- **Missão:** colocar agentes de IA lado a lado com humanos para automatizar tarefas e liberar tempo para o que importa.
- **Visão:** um mundo onde cada pessoa e empresa tenha um time de agentes trabalhando 24/7.
- **Valores:** transparência, utilidade real e evolução contínua.

Algum desses pontos você quer aprofundar?",
    ),
    KeywordRule::new(
        &["tecnologia", "inteligência artificial", "inteligencia artificial", "como funciona"],
        "## Nossa tecnologia ⚙️

Cada agente é especializado em um problema, conectado às plataformas que você já usa e capaz de colaborar com outros agentes. Assim, um Agent Stock pode avisar o Agent Integration quando um produto acabar, por exemplo.

Quer ver como isso se aplica ao seu caso?",
    ),
    KeywordRule::new(
        &["contato", "email", "e-mail", "telefone", "falar com"],
        "## Fale com a gente 📬

Você pode falar com nosso time pelo email **contato@agentfirst.com.br** ou continuar por aqui mesmo. Conte um pouco sobre o que você precisa!",
    ),
];

pub const SOBRE_DEFAULT: &str = "Boa pergunta! Sobre \"{input}\": a Agent First é uma startup focada em um **ecossistema de agentes inteligentes** para pessoas e empresas.

Posso contar mais sobre nossa **história**, nossa **missão e valores** ou a **tecnologia** por trás dos agentes. Por onde quer começar?";

pub const AGENTS_RULES: &[KeywordRule] = &[
    KeywordRule::new(
        &["estoque", "stock", "inventário", "inventario", "reposição", "reposicao"],
        "## 📦 Agent Stock

O Agent Stock cuida do seu estoque de ponta a ponta:
- Controle automático de inventário
- Previsão de demanda com base no histórico de vendas
- Alertas inteligentes de reposição
- Relatórios em tempo real

Quantos produtos você gerencia hoje? Assim consigo indicar a melhor configuração.",
    ),
    KeywordRule::new(
        &["integra", "ifood", "99food", "shopee", "marketplace", "canais", "pedidos"],
        "## 🔗 Agent Integration

O Agent Integration conecta seus canais de venda em um só lugar:
- Conexão com **iFood**, **99Food** e **Shopee**
- Sincronização automática de pedidos
- Unificação de cardápios e catálogos
- Automação de processos multicanal

Em quais plataformas você vende hoje?",
    ),
    KeywordRule::new(
        &["analytics", "dashboard", "relatório", "relatorio", "métrica", "metrica"],
        "## 📊 Agent Analytics

O Agent Analytics transforma seus dados em decisões: dashboards personalizados, insights de negócio e previsões de tendências. Que tipo de indicador é mais importante para você?",
    ),
    KeywordRule::new(
        &["suporte", "atendimento", "support", "sac"],
        "## 💬 Agent Support

O Agent Support atende seus clientes 24/7 com respostas automatizadas e escala para um humano quando necessário. Qual o volume de atendimentos que você recebe por dia?",
    ),
    KeywordRule::new(
        &["pessoal", "personal", "finanças", "financas", "saúde", "saude", "produtividade"],
        "## 👤 Agents Pessoais

Para o dia a dia temos o **Agent Finance** (finanças pessoais), o **Agent Health** (saúde e bem-estar) e o **Agent Productivity** (rotina e tarefas). Qual deles combina mais com você?",
    ),
];

pub const AGENTS_DEFAULT: &str = "Entendi seu interesse em \"{input}\"! 🤖

Temos agentes **pessoais** (Finance, Health, Productivity) e **empresariais** (Stock, Integration, Analytics, Support). Me conte qual problema você quer resolver que eu indico o agente certo.";

pub const APRENDA_RULES: &[KeywordRule] = &[
    KeywordRule::new(
        &["iniciante", "começar", "comecar", "básico", "basico", "fundamentos"],
        "## ⭐ Fundamentos Agent First

Ótimo ponto de partida! Neste curso você aprende:
- O que são agentes inteligentes
- Como a IA está transformando negócios
- Conceitos básicos de automação

Quer que eu te envie o primeiro módulo?",
    ),
    KeywordRule::new(
        &["implementa", "negócio", "negocio", "intermediário", "intermediario"],
        "## 📈 Implementando Agentes no seu Negócio

Curso intermediário sobre como escolher os agentes certos, integrar com sistemas existentes e seguir as melhores práticas de implementação. Qual é o seu segmento?",
    ),
    KeywordRule::new(
        &["roi", "retorno", "avançado", "avancado", "kpi", "escala"],
        "## 💰 Maximizando ROI com Agentes

Curso avançado com métricas e KPIs importantes, otimização de processos e estratégias para escalar operações com IA. Você já acompanha algum indicador hoje?",
    ),
    KeywordRule::new(
        &["workshop", "prático", "pratico", "integração", "integracao", "troubleshooting"],
        "## 🔧 Workshop: Agent Integration

Sessão prática integrando com iFood, Shopee e outras plataformas, com configurações avançadas e troubleshooting comum. Quer saber a data da próxima turma?",
    ),
    KeywordRule::new(
        &["ebook", "e-book", "webinar", "comunidade", "gratuito", "grátis", "gratis"],
        "## 📖 Recursos Gratuitos

Você tem acesso livre a e-books sobre automação, webinars semanais, nossa comunidade de usuários e suporte técnico dedicado. Qual formato você prefere?",
    ),
];

pub const APRENDA_DEFAULT: &str = "Legal que você quer aprender sobre \"{input}\"! 📚

Temos trilhas do nível **iniciante** ao **avançado**, além de um **workshop prático** e **recursos gratuitos**. Qual é o seu objetivo principal? Assim monto o melhor caminho para você.";

pub const PRECOS_RULES: &[KeywordRule] = &[
    KeywordRule::new(
        &["grátis", "gratis", "gratuito", "free", "starter", "sem custo"],
        "## 🆓 Plano Starter (Gratuito)

Perfeito para conhecer a plataforma:
- 1 Agente pessoal básico
- 100 interações/mês
- Suporte por email
- Acesso à comunidade

Quer que eu te ajude a criar sua conta gratuita?",
    ),
    KeywordRule::new(
        &["empresa", "enterprise", "business", "corporativ", "equipe", "white-label"],
        "## 🏢 Planos para empresas

- **Business – R$ 297/mês:** 10 agentes, interações ilimitadas, Agent Integration completo, todas as integrações e suporte 24/7.
- **Enterprise – sob consulta:** agentes customizados, SLA garantido, gerente de conta dedicado, API completa e white-label.

Quantas pessoas usariam os agentes na sua empresa?",
    ),
    KeywordRule::new(
        &["plano pro", "profissional", "97"],
        "## ⭐ Plano Pro – R$ 97/mês

Ideal para profissionais e pequenos negócios: 3 agentes à escolha, 1.000 interações/mês, Agent Stock básico, suporte prioritário e integrações básicas. Quer começar pelo Pro?",
    ),
    KeywordRule::new(
        &["desconto", "anual", "promoção", "promocao"],
        "## 💡 Desconto anual

Pagando anualmente você tem **20% de desconto** em qualquer plano pago. Quer que eu calcule o valor para o plano que te interessa?",
    ),
    KeywordRule::new(
        &["trocar", "mudar", "upgrade", "downgrade", "cancelar"],
        "## 🔄 Troca de plano

Você pode trocar de plano **a qualquer momento**, sem burocracia. A diferença é ajustada proporcionalmente na próxima fatura. Para qual plano você quer mudar?",
    ),
];

pub const PRECOS_DEFAULT: &str = "Obrigado pela pergunta sobre \"{input}\"! 💎

Para indicar o plano ideal, me conte um pouco mais:
1. Você vai usar os agentes para uso **pessoal** ou para uma **empresa**?
2. Quantas interações por mês você imagina ter?
3. Precisa de integrações como iFood ou Shopee?

Com isso eu te recomendo entre Starter, Pro, Business e Enterprise.";

/// Reply for conversations outside the catalog. Identical for every input.
pub const GENERIC_REPLY: &str = "Olá! Sou o Agent First, o assistente da sua nova startup.

Você está construindo algo incrível com o conceito \"Agent First\" - um ecossistema onde agentes inteligentes resolvem problemas reais para pessoas e empresas.

Alguns caminhos para construir essa startup:

1. **Definir os primeiros agentes** - Quais problemas específicos você quer resolver primeiro?
2. **Arquitetura do ecossistema** - Como os agentes vão se comunicar e colaborar?
3. **Modelo de negócio** - Freemium, enterprise, marketplace de agentes?
4. **MVP** - Começar com 1-2 agentes muito bem feitos

Como posso ajudar você a avançar?";

pub const SOBRE: KeywordGenerator = KeywordGenerator::new("sobre", SOBRE_RULES, SOBRE_DEFAULT);
pub const AGENTS: KeywordGenerator = KeywordGenerator::new("agents", AGENTS_RULES, AGENTS_DEFAULT);
pub const APRENDA: KeywordGenerator =
    KeywordGenerator::new("aprenda", APRENDA_RULES, APRENDA_DEFAULT);
pub const PRECOS: KeywordGenerator = KeywordGenerator::new("precos", PRECOS_RULES, PRECOS_DEFAULT);
pub const GENERIC: KeywordGenerator = KeywordGenerator::new("generic", &[], GENERIC_REPLY);

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [KeywordGenerator; 5] = [SOBRE, AGENTS, APRENDA, PRECOS, GENERIC];

    #[test]
    fn keywords_are_lowercase_and_non_empty() {
        for generator in ALL {
            for rule in generator.rules() {
                assert!(!rule.keywords.is_empty(), "{} has an empty rule", generator.name());
                for keyword in rule.keywords {
                    assert!(!keyword.is_empty());
                    assert_eq!(
                        *keyword,
                        keyword.to_lowercase(),
                        "{} keyword '{keyword}' can never match lowered input",
                        generator.name()
                    );
                }
            }
        }
    }

    #[test]
    fn agents_checks_stock_before_integration() {
        assert_eq!(AGENTS.matched_rule("Preciso controlar o estoque"), Some(0));
        assert_eq!(AGENTS.matched_rule("Vocês integram com o iFood?"), Some(1));
        // Both classes present: stock is declared first.
        assert_eq!(
            AGENTS.matched_rule("estoque sincronizado com a Shopee"),
            Some(0)
        );
        assert_eq!(AGENTS.select_template("me fala dos agentes"), AGENTS_DEFAULT);
    }

    #[test]
    fn precos_checks_free_before_business() {
        let reply = PRECOS.generate("Tem plano GRATIS para minha empresa?");
        assert!(reply.starts_with("## 🆓 Plano Starter"));

        let reply = PRECOS.generate("Quero o plano Enterprise");
        assert!(reply.starts_with("## 🏢 Planos para empresas"));
    }

    #[test]
    fn precos_default_quotes_question() {
        let reply = PRECOS.generate("Quanto custa?");
        assert!(reply.starts_with("Obrigado pela pergunta sobre \"Quanto custa?\""));
    }

    #[test]
    fn sobre_routes_history_and_values() {
        assert_eq!(SOBRE.matched_rule("Qual a HISTÓRIA de vocês?"), Some(0));
        assert_eq!(SOBRE.matched_rule("quais são os valores"), Some(1));
        assert_eq!(SOBRE.matched_rule("oi"), None);
    }

    #[test]
    fn aprenda_routes_beginner_track() {
        assert_eq!(APRENDA.matched_rule("Sou iniciante"), Some(0));
        assert_eq!(APRENDA.matched_rule("tem webinar?"), Some(4));
    }

    #[test]
    fn generic_has_no_rules() {
        assert!(GENERIC.rules().is_empty());
        assert_eq!(GENERIC.generate("estoque grátis"), GENERIC_REPLY);
    }
}
