//! Built-in legal knowledge seeded into every store.

use covenant_core::models::{KnowledgeCategory, KnowledgeEntry};

/// The five seed entries.
pub fn legal_corpus() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "A contract lawfully formed is legally binding on the parties. \
             Each party shall perform its obligations as agreed and shall not \
             modify or rescind the contract without authorisation.",
            "statute",
            KnowledgeCategory::Validity,
            "contract validity",
        ),
        KnowledgeEntry::new(
            "A contract should contain the following essential elements: the \
             names and domiciles of the parties; the subject matter; quantity; \
             quality; price or remuneration; time, place and method of \
             performance; liability for breach; and the method of dispute \
             resolution.",
            "contract elements",
            KnowledgeCategory::Structure,
            "contract structure",
        ),
        KnowledgeEntry::new(
            "Liquidated damages clauses should be reasonable and must not \
             greatly exceed the loss caused. Where liquidated damages are \
             excessive, a party may ask a court or arbitration body to reduce \
             them appropriately.",
            "risk advisory",
            KnowledgeCategory::Risk,
            "liability for breach",
        ),
        KnowledgeEntry::new(
            "A unilateral right of termination must satisfy the statutory \
             conditions and must not be abused. Conditions for unilateral \
             termination agreed in a contract should be clear and reasonable.",
            "risk advisory",
            KnowledgeCategory::Risk,
            "termination",
        ),
        KnowledgeEntry::new(
            "A dispute resolution clause should state clearly how disputes are \
             resolved: negotiation, mediation, arbitration or litigation. An \
             arbitration clause should name the arbitration institution and \
             its rules.",
            "contract clause",
            KnowledgeCategory::Dispute,
            "dispute resolution",
        ),
    ]
}
