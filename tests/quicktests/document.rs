use bst_doc::{Style, Tree};

#[quickcheck]
fn document_round_trip(xs: Vec<i32>) -> bool {
    let tree: Tree<i32> = xs.into_iter().collect();
    let doc = tree.to_document().unwrap();

    Tree::<i32>::from_document(&doc).unwrap() == tree
}

#[quickcheck]
fn text_round_trip(xs: Vec<String>, compact: bool) -> bool {
    let tree: Tree<String> = xs.into_iter().collect();
    let style = if compact { Style::Compact } else { Style::Pretty };
    let text = tree.to_text(style).unwrap();

    Tree::<String>::from_text(&text).unwrap() == tree
}

#[quickcheck]
fn round_trip_after_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.into_iter().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut buffer = Vec::new();
    tree.to_writer(&mut buffer, Style::Compact).unwrap();
    let loaded = Tree::<i8>::from_reader(buffer.as_slice()).unwrap();

    loaded == tree && loaded.preorder() == tree.preorder()
}
