//! Python (SWAT) script templates, one per variant.

use crate::template::{Template, TemplateBlock};

const HEADER: TemplateBlock = TemplateBlock::new(
    "header",
    r#"## SWAT package needed to run the codes, below the packages in pip and conda
# documentation: https://github.com/sassoftware/python-swat/
# pip install swat
# conda install -c sas-institute swat

import swat

"#,
);

const CONNECTION: TemplateBlock = TemplateBlock::new(
    "connection",
    r#"## Connecting to SAS Viya
conn = swat.CAS(hostname = "${hostname}", ## change if needed
                port = 8777,
                protocol='http',  ## change protocol to cas and port to 5570 if using binary connection (unix)
                username='username', ## use your own credentials
                password='password') ## we encorage using .authinfo

"#,
);

pub(super) const DATA_STEP: Template = Template {
    blocks: &[
        HEADER,
        TemplateBlock::new(
            "variables",
            r#"## Defining tables variables
in_caslib = "${in_caslib}"
in_castable = "${in_castable}"
out_caslib = "${out_caslib}"
out_castable = "${out_castable}"

"#,
        ),
        CONNECTION,
        TemplateBlock::new(
            "action",
            r#"out = conn.dataStep.runCode(code = """
${data_step}""")

### uncomment following lines if you want to drop previous table

#conn.table.dropTable(name = "${out_castable}",
#                     caslib = "${out_caslib}")

## Uncomment the following to promote a table to all users
## will fail if there is already a promoted table with the same name

#conn.table.promote(name = "${out_castable}",
#                   caslib = "${out_caslib}")

"#,
        ),
        TemplateBlock::new(
            "output",
            r#"## Defining the scored table in Python

scored_table = conn.CASTable(name = "${out_castable}",
                             caslib = "${out_caslib}")

scored_table.head()
"#,
        ),
    ],
};

pub(super) const ASTORE: Template = Template {
    blocks: &[
        HEADER,
        TemplateBlock::new(
            "variables",
            r#"## Defining tables and models variables
in_caslib = "${in_caslib}"
in_castable = "${in_castable}"
out_caslib = "${out_caslib}"
out_castable = "${out_castable}"
astore_name = "${astore_name}"
astore_file_name = "${astore_file_name}"

"#,
        ),
        CONNECTION,
        TemplateBlock::new(
            "model",
            r#"## Loading model to memory
## assuming the model is already inside the viya server
conn.table.loadTable(caslib= "Models",
                      path = astore_file_name, #case sensitive
                      casOut = {"name": astore_name,
                                "caslib": "Models"}
                                )

"#,
        ),
        TemplateBlock::new("copy_vars", "${copy_vars}\n"),
        TemplateBlock::new(
            "action",
            r#"## loading astore actionset and scoring
conn.loadActionSet("astore")

conn.astore.score(table = {"caslib": in_caslib, "name": in_castable},
                   out = {"caslib": out_caslib, "name": out_castable, "replace": True},
                   copyVars = column_names,
                   rstore = {"name": astore_name, "caslib": "Models"}
              )

"#,
        ),
        TemplateBlock::new(
            "output",
            r#"## Obtaining output/results table
scored_table = conn.CASTable(name = out_castable,
                              caslib = out_caslib)

scored_table.head()
"#,
        ),
    ],
};

pub(super) const SENTIMENT: Template = Template {
    blocks: &[
        HEADER,
        TemplateBlock::new(
            "variables",
            r#"## Defining tables and models variables
in_caslib = "${in_caslib}"
in_castable = "${in_castable}"
out_caslib = "${out_caslib}"
out_castable_sentiment = "${out_castable_sentiment}"
out_castable_matches = "${out_castable_matches}"
out_castable_features = "${out_castable_features}"
key_column = "${key_column}"
document_column = "${document_column}"
language = "${language}"

"#,
        ),
        CONNECTION,
        TemplateBlock::new(
            "action",
            r#"## loading sentimentAnalysis actionset and scoring
conn.loadActionSet("sentimentAnalysis")

conn.sentimentAnalysis.applySent(
        table = {"name": in_castable, "caslib": in_caslib},
        docId = key_column,
        text = document_column,
        language = language,
        casOut = {"caslib": out_caslib, "name": out_castable_sentiment, "replace": True},
        matchOut = {"caslib": out_caslib, "name": out_castable_matches, "replace": True},
        featureOut = {"caslib": out_caslib, "name": out_castable_features, "replace": True}
    )

"#,
        ),
        TemplateBlock::new(
            "output",
            r#"## Defining the scored cas table in Python (output)
scored_sentiment_table = conn.CASTable(name = "${out_castable_sentiment}",
                             caslib = "${out_caslib}")

scored_sentiment_table.head()
"#,
        ),
    ],
};

pub(super) const CATEGORY: Template = Template {
    blocks: &[
        HEADER,
        TemplateBlock::new(
            "variables",
            r#"## Defining tables and models variables
in_caslib = "${in_caslib}"
in_castable = "${in_castable}"
out_caslib = "${out_caslib}"
out_castable_category = "${out_castable_category}"
out_castable_matches = "${out_castable_matches}"
out_castable_modeling = "${out_castable_modeling}"
key_column = "${key_column}"
document_column = "${document_column}"
mco_binary_caslib = "${mco_binary_caslib}"
mco_binary_table_name = "${mco_binary_table_name}"

"#,
        ),
        CONNECTION,
        TemplateBlock::new(
            "action",
            r#"## loading textRuleScore actionset and scoring
conn.loadActionSet("textRuleScore")

conn.textRuleScore.applyCategory(
        model = {"caslib": mco_binary_caslib, "name": mco_binary_table_name},
        table = {"name": in_castable, "caslib": in_caslib},
        docId = key_column,
        text = document_column,
        casOut = {"caslib": out_caslib, "name": out_castable_category, "replace": True},
        matchOut = {"caslib": out_caslib, "name": out_castable_matches, "replace": True},
        modelOut = {"caslib": out_caslib, "name": out_castable_modeling, "replace": True}
    )

"#,
        ),
        TemplateBlock::new(
            "output",
            r#"## Defining the scored cas table in Python (output)
scored_category_table = conn.CASTable(name = "${out_castable_category}",
                             caslib = "${out_caslib}")

scored_category_table.head()
"#,
        ),
    ],
};

pub(super) const TOPICS: Template = Template {
    blocks: &[
        HEADER,
        TemplateBlock::new(
            "variables",
            r#"## Defining tables and models variables
in_caslib = "${in_caslib}"
in_castable = "${in_castable}"
out_caslib = "${out_caslib}"
out_castable = "${out_castable}"
astore_caslib = "${astore_caslib}"
astore_table_name = "${astore_table_name}"

"#,
        ),
        CONNECTION,
        TemplateBlock::new(
            "model",
            r#"## If Uploading model to a new server uncomment this section and add correct filepath
#conn.table.loadTable(caslib = "Models",
#path = "/path/to/TopicsModel.astore", ## case sensitive
#casout = {"name": astore_table_name,
#          "caslib": "Models"}) ## change caslib as well if needed

"#,
        ),
        TemplateBlock::new("copy_vars", "${copy_vars}\n"),
        TemplateBlock::new(
            "action",
            r#"## loading astore actionset and scoring
conn.loadActionSet("astore")

## The input table column names must be the equal as the training table
conn.astore.score(
        table = {"name": in_castable, "caslib": in_caslib},
        casOut = {"caslib": out_caslib, "name": out_castable, "replace": True},
        copyVars = column_names,
        rstore = {"caslib": astore_caslib, "name": astore_table_name} ## if you uploaded manually, change may be needed
    )

"#,
        ),
        TemplateBlock::new(
            "output",
            r#"## Defining the scored cas table in Python (output)
scored_topics_table = conn.CASTable(name = "${out_castable}",
                             caslib = "${out_caslib}")

scored_topics_table.head()
"#,
        ),
    ],
};

pub(super) const CONCEPTS: Template = Template {
    blocks: &[
        HEADER,
        TemplateBlock::new(
            "variables",
            r#"## Defining tables and models variables
in_caslib = "${in_caslib}"
in_castable = "${in_castable}"
out_caslib = "${out_caslib}"
out_castable_concepts = "${out_castable_concepts}"
out_castable_facts = "${out_castable_facts}"
key_column = "${key_column}"
document_column = "${document_column}"
liti_binary_caslib = "${liti_binary_caslib}"
liti_binary_table_name = "${liti_binary_table_name}"

"#,
        ),
        CONNECTION,
        TemplateBlock::new(
            "action",
            r#"## loading textRuleScore actionset and scoring
conn.loadActionSet("textRuleScore")

conn.textRuleScore.applyConcept(
        model = {"caslib": liti_binary_caslib, "name": liti_binary_table_name},
        table = {"name": in_castable, "caslib": in_caslib},
        docId = key_column,
        text = document_column,
        casOut = {"caslib": out_caslib, "name": out_castable_concepts, "replace": True},
        factOut = {"caslib": out_caslib, "name": out_castable_facts, "replace": True}
    )

"#,
        ),
        TemplateBlock::new(
            "output",
            r#"## Defining the scored cas table in Python (output)
scored_concepts_table = conn.CASTable(name = "${out_castable_concepts}",
                             caslib = "${out_caslib}")

scored_concepts_table.head()
"#,
        ),
    ],
};
