use std::fs;
use std::path::{Path, PathBuf};

pub const MOT15_GT: &str = "1,1,415,449,129,269,1,-1,-1,-1
3,1,581,443,97,269,1,-1,-1,-1
3,2,1347,415,153,377,1,-1,-1,-1
3,3,1429,423,161,339,1,-1,-1,-1
6,1,413,449,131,269,1,-1,-1,-1
6,2,579,443,97,269,1,-1,-1,-1
6,3,1353,413,155,379,1,-1,-1,-1
6,4,1437,421,157,341,1,-1,-1,-1
";

pub fn seq_info(name: &str, length: usize) -> String {
    format!(
        "[Sequence]\nname={}\nimDir=img1\nframeRate=30\nseqLength={}\nimWidth=1920\nimHeight=1080\nimExt=.jpg\n",
        name, length
    )
}

/// Creates `<root>/<name>` in MOT15 layout with `length` fake frames.
pub fn make_sequence(root: &Path, name: &str, length: usize, gt: &str) -> PathBuf {
    let seq = root.join(name);
    fs::create_dir_all(seq.join("img1")).unwrap();
    fs::create_dir_all(seq.join("gt")).unwrap();
    fs::write(seq.join("seqinfo.ini"), seq_info(name, length)).unwrap();
    fs::write(seq.join("gt").join("gt.txt"), gt).unwrap();
    for i in 1..=length {
        fs::write(
            seq.join("img1").join(format!("{:06}.jpg", i)),
            format!("{}:{}", name, i),
        )
        .unwrap();
    }
    seq
}
