use aligner::text::align_words;
use aligner::{Aligner, Operation};
use console::{style, Style};

fn main() {
    let old = "the quick brown fox jumps over the lazy dog";
    let new = "the brown quick fox jumped over a lazy dog";

    let aligner = Aligner::damerau_levenshtein();
    let alignment = align_words(&aligner, old, new);

    for edit in &alignment {
        let (marker, s) = match edit.operation() {
            Operation::Equal => (" ", Style::new().dim()),
            Operation::Insert => ("+", Style::new().green()),
            Operation::Delete => ("-", Style::new().red()),
            Operation::Substitute => ("~", Style::new().yellow()),
            Operation::Transpose => ("%", Style::new().cyan()),
        };
        println!(
            "{}{:>3}:{:<3} {} -> {}",
            s.apply_to(marker).bold(),
            edit.source().position(),
            edit.target().position(),
            s.apply_to(edit.source().tokens().join(" ")),
            s.apply_to(edit.target().tokens().join(" ")),
        );
    }

    println!(
        "cost: {}  distance: {:.3}  similarity: {:.3}",
        style(alignment.cost()).bold(),
        alignment.distance(),
        alignment.similarity()
    );
}
