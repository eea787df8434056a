use std::{env, fs, path::Path};

#[path = "src/mask.rs"]
mod mask;

use mask::Mask;

// One block per kind, in catalog order. Columns are rotation states 0..3,
// each turned a quarter clockwise from the previous one.
const SHAPES_TXT: &str = r"
I
....|..#.|....|.#..
####|..#.|....|.#..
....|..#.|####|.#..
....|..#.|....|.#..
O
.##.|.##.|.##.|.##.
.##.|.##.|.##.|.##.
....|....|....|....
....|....|....|....
T
.#..|.#..|....|.#..
###.|.##.|###.|##..
....|.#..|.#..|.#..
....|....|....|....
S
.##.|.#..|....|#...
##..|.##.|.##.|##..
....|..#.|##..|.#..
....|....|....|....
Z
##..|..#.|....|.#..
.##.|.##.|##..|##..
....|.#..|.##.|#...
....|....|....|....
J
#...|.##.|....|.#..
###.|.#..|###.|.#..
....|.#..|..#.|##..
....|....|....|....
L
..#.|.#..|....|##..
###.|.#..|###.|.#..
....|.##.|#...|.#..
....|....|....|....
";

struct ShapesExt {
    kinds: Vec<[Mask; 4]>,
}

impl quote::ToTokens for ShapesExt {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let kinds: Vec<_> = self
            .kinds
            .iter()
            .map(|rotations| {
                let bits = rotations.iter().map(|m| m.bits);
                quote::quote! {
                    [#(Mask::new(#bits)),*]
                }
            })
            .collect();

        tokens.extend(quote::quote! {
            #(#kinds),*
        });
    }
}

fn split_shapes_txt(text: &str) -> Vec<(String, Vec<String>)> {
    let mut shapes: Vec<(String, Vec<String>)> = Vec::new();
    for line in text.trim().lines() {
        if !line.contains('|') {
            shapes.push((line.trim().to_string(), Vec::new()));
            continue;
        }
        let (_, rotations) = shapes
            .last_mut()
            .expect("shape rows must follow a kind label");
        for (idx, part) in line.split('|').enumerate() {
            if rotations.len() <= idx {
                rotations.push(String::new());
            }
            rotations[idx].push_str(part);
            rotations[idx].push('\n');
        }
    }
    shapes
}

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("shapes.rs");

    let parsed = split_shapes_txt(SHAPES_TXT);
    assert_eq!(parsed.len(), 7, "expected seven piece kinds");

    let kinds = parsed
        .iter()
        .map(|(label, rotations)| {
            assert_eq!(rotations.len(), 4, "kind {label} needs four rotations");
            let mut masks = [Mask::default(); 4];
            for (mask, art) in masks.iter_mut().zip(rotations) {
                *mask = Mask::from_str(art);
                assert_eq!(mask.count(), 4, "kind {label} is not a tetromino");
            }
            masks
        })
        .collect();
    let shapes = ShapesExt { kinds };

    let code = quote::quote! {
        const SHAPES: [[Mask; 4]; 7] = [ #shapes ];
    }
    .to_string();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/mask.rs");

    let file = syn::parse_file(&code).unwrap();
    fs::write(&dest_path, prettyplease::unparse(&file)).unwrap();
}
